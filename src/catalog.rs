//! Bundled problem roadmaps for bulk import.

use crate::models::Difficulty;

/// One problem in a bundled roadmap list.
pub struct CatalogEntry {
    pub category: &'static str,
    pub title: &'static str,
    pub difficulty: Difficulty,
    pub link: &'static str,
}

pub fn packs() -> [(&'static str, &'static [CatalogEntry]); 2] {
    [("NeetCode 150", NEETCODE), ("Blind 75", BLIND75)]
}

use Difficulty::{Easy, Hard, Medium};

macro_rules! entry {
    ($cat:expr, $title:expr, $diff:expr, $slug:expr) => {
        CatalogEntry {
            category: $cat,
            title: $title,
            difficulty: $diff,
            link: concat!("https://leetcode.com/problems/", $slug, "/"),
        }
    };
}

pub const NEETCODE: &[CatalogEntry] = &[
    entry!("Arrays & Hashing", "Contains Duplicate", Easy, "contains-duplicate"),
    entry!("Arrays & Hashing", "Valid Anagram", Easy, "valid-anagram"),
    entry!("Arrays & Hashing", "Two Sum", Easy, "two-sum"),
    entry!("Arrays & Hashing", "Group Anagrams", Medium, "group-anagrams"),
    entry!("Arrays & Hashing", "Top K Frequent Elements", Medium, "top-k-frequent-elements"),
    entry!("Arrays & Hashing", "Product of Array Except Self", Medium, "product-of-array-except-self"),
    entry!("Arrays & Hashing", "Valid Sudoku", Medium, "valid-sudoku"),
    entry!("Arrays & Hashing", "Longest Consecutive Sequence", Medium, "longest-consecutive-sequence"),
    entry!("Two Pointers", "Valid Palindrome", Easy, "valid-palindrome"),
    entry!("Two Pointers", "Two Sum II Input Array Is Sorted", Medium, "two-sum-ii-input-array-is-sorted"),
    entry!("Two Pointers", "3Sum", Medium, "3sum"),
    entry!("Two Pointers", "Container With Most Water", Medium, "container-with-most-water"),
    entry!("Two Pointers", "Trapping Rain Water", Hard, "trapping-rain-water"),
    entry!("Sliding Window", "Best Time to Buy and Sell Stock", Easy, "best-time-to-buy-and-sell-stock"),
    entry!("Sliding Window", "Longest Substring Without Repeating Characters", Medium, "longest-substring-without-repeating-characters"),
    entry!("Sliding Window", "Longest Repeating Character Replacement", Medium, "longest-repeating-character-replacement"),
    entry!("Sliding Window", "Permutation in String", Medium, "permutation-in-string"),
    entry!("Stack", "Valid Parentheses", Easy, "valid-parentheses"),
    entry!("Stack", "Min Stack", Medium, "min-stack"),
    entry!("Stack", "Evaluate Reverse Polish Notation", Medium, "evaluate-reverse-polish-notation"),
    entry!("Stack", "Generate Parentheses", Medium, "generate-parentheses"),
    entry!("Stack", "Daily Temperatures", Medium, "daily-temperatures"),
    entry!("Stack", "Car Fleet", Medium, "car-fleet"),
    entry!("Stack", "Largest Rectangle in Histogram", Hard, "largest-rectangle-in-histogram"),
    entry!("Binary Search", "Binary Search", Easy, "binary-search"),
    entry!("Binary Search", "Search a 2D Matrix", Medium, "search-a-2d-matrix"),
    entry!("Binary Search", "Koko Eating Bananas", Medium, "koko-eating-bananas"),
    entry!("Binary Search", "Find Minimum in Rotated Sorted Array", Medium, "find-minimum-in-rotated-sorted-array"),
    entry!("Binary Search", "Search in Rotated Sorted Array", Medium, "search-in-rotated-sorted-array"),
    entry!("Binary Search", "Time Based Key-Value Store", Medium, "time-based-key-value-store"),
    entry!("Binary Search", "Median of Two Sorted Arrays", Hard, "median-of-two-sorted-arrays"),
];

pub const BLIND75: &[CatalogEntry] = &[
    entry!("Array", "Two Sum", Easy, "two-sum"),
    entry!("Array", "Best Time to Buy and Sell Stock", Easy, "best-time-to-buy-and-sell-stock"),
    entry!("Array", "Contains Duplicate", Easy, "contains-duplicate"),
    entry!("Array", "Product of Array Except Self", Medium, "product-of-array-except-self"),
    entry!("Array", "Maximum Subarray", Medium, "maximum-subarray"),
    entry!("Array", "Maximum Product Subarray", Medium, "maximum-product-subarray"),
    entry!("Array", "Find Minimum in Rotated Sorted Array", Medium, "find-minimum-in-rotated-sorted-array"),
    entry!("Array", "Search in Rotated Sorted Array", Medium, "search-in-rotated-sorted-array"),
    entry!("Array", "3Sum", Medium, "3sum"),
    entry!("Array", "Container With Most Water", Medium, "container-with-most-water"),
    entry!("Binary", "Sum of Two Integers", Medium, "sum-of-two-integers"),
    entry!("Binary", "Number of 1 Bits", Easy, "number-of-1-bits"),
    entry!("Binary", "Counting Bits", Easy, "counting-bits"),
    entry!("Binary", "Missing Number", Easy, "missing-number"),
    entry!("Binary", "Reverse Bits", Easy, "reverse-bits"),
    entry!("DP", "Climbing Stairs", Easy, "climbing-stairs"),
    entry!("DP", "Coin Change", Medium, "coin-change"),
    entry!("DP", "Longest Increasing Subsequence", Medium, "longest-increasing-subsequence"),
    entry!("DP", "Longest Common Subsequence", Medium, "longest-common-subsequence"),
    entry!("DP", "Word Break", Medium, "word-break"),
    entry!("DP", "Combination Sum", Medium, "combination-sum"),
    entry!("DP", "House Robber", Medium, "house-robber"),
    entry!("DP", "House Robber II", Medium, "house-robber-ii"),
    entry!("DP", "Decode Ways", Medium, "decode-ways"),
    entry!("DP", "Unique Paths", Medium, "unique-paths"),
    entry!("DP", "Jump Game", Medium, "jump-game"),
    entry!("Graph", "Clone Graph", Medium, "clone-graph"),
    entry!("Graph", "Course Schedule", Medium, "course-schedule"),
    entry!("Graph", "Pacific Atlantic Water Flow", Medium, "pacific-atlantic-water-flow"),
    entry!("Graph", "Number of Islands", Medium, "number-of-islands"),
    entry!("Graph", "Longest Consecutive Sequence", Medium, "longest-consecutive-sequence"),
    entry!("Graph", "Alien Dictionary", Hard, "alien-dictionary"),
    entry!("Graph", "Graph Valid Tree", Medium, "graph-valid-tree"),
    entry!("Graph", "Number of Connected Components in an Undirected Graph", Medium, "number-of-connected-components-in-an-undirected-graph"),
    entry!("Interval", "Insert Interval", Medium, "insert-interval"),
    entry!("Interval", "Merge Intervals", Medium, "merge-intervals"),
    entry!("Interval", "Non-overlapping Intervals", Medium, "non-overlapping-intervals"),
    entry!("Interval", "Meeting Rooms", Easy, "meeting-rooms"),
    entry!("Interval", "Meeting Rooms II", Medium, "meeting-rooms-ii"),
    entry!("Linked List", "Reverse Linked List", Easy, "reverse-linked-list"),
    entry!("Linked List", "Linked List Cycle", Easy, "linked-list-cycle"),
    entry!("Linked List", "Merge Two Sorted Lists", Easy, "merge-two-sorted-lists"),
    entry!("Linked List", "Merge k Sorted Lists", Hard, "merge-k-sorted-lists"),
    entry!("Linked List", "Remove Nth Node From End of List", Medium, "remove-nth-node-from-end-of-list"),
    entry!("Linked List", "Reorder List", Medium, "reorder-list"),
    entry!("Matrix", "Set Matrix Zeroes", Medium, "set-matrix-zeroes"),
    entry!("Matrix", "Spiral Matrix", Medium, "spiral-matrix"),
    entry!("Matrix", "Rotate Image", Medium, "rotate-image"),
    entry!("String", "Longest Substring Without Repeating Characters", Medium, "longest-substring-without-repeating-characters"),
    entry!("String", "Longest Repeating Character Replacement", Medium, "longest-repeating-character-replacement"),
    entry!("String", "Minimum Window Substring", Hard, "minimum-window-substring"),
    entry!("String", "Valid Anagram", Easy, "valid-anagram"),
    entry!("String", "Group Anagrams", Medium, "group-anagrams"),
    entry!("String", "Valid Parentheses", Easy, "valid-parentheses"),
    entry!("String", "Valid Palindrome", Easy, "valid-palindrome"),
    entry!("String", "Longest Palindromic Substring", Medium, "longest-palindromic-substring"),
    entry!("String", "Palindromic Substrings", Medium, "palindromic-substrings"),
    entry!("Tree", "Maximum Depth of Binary Tree", Easy, "maximum-depth-of-binary-tree"),
    entry!("Tree", "Same Tree", Easy, "same-tree"),
    entry!("Tree", "Invert Binary Tree", Easy, "invert-binary-tree"),
    entry!("Tree", "Binary Tree Maximum Path Sum", Hard, "binary-tree-maximum-path-sum"),
    entry!("Tree", "Binary Tree Level Order Traversal", Medium, "binary-tree-level-order-traversal"),
    entry!("Tree", "Serialize and Deserialize Binary Tree", Hard, "serialize-and-deserialize-binary-tree"),
    entry!("Tree", "Subtree of Another Tree", Easy, "subtree-of-another-tree"),
    entry!("Tree", "Construct Binary Tree from Preorder and Inorder Traversal", Medium, "construct-binary-tree-from-preorder-and-inorder-traversal"),
    entry!("Tree", "Validate Binary Search Tree", Medium, "validate-binary-search-tree"),
    entry!("Tree", "Kth Smallest Element in a BST", Medium, "kth-smallest-element-in-a-bst"),
    entry!("Tree", "Lowest Common Ancestor of a Binary Search Tree", Medium, "lowest-common-ancestor-of-a-binary-search-tree"),
    entry!("Tree", "Implement Trie (Prefix Tree)", Medium, "implement-trie-prefix-tree"),
    entry!("Tree", "Design Add and Search Words Data Structure", Medium, "design-add-and-search-words-data-structure"),
    entry!("Tree", "Word Search II", Hard, "word-search-ii"),
    entry!("Heap", "Merge k Sorted Lists", Hard, "merge-k-sorted-lists"),
    entry!("Heap", "Top K Frequent Elements", Medium, "top-k-frequent-elements"),
    entry!("Heap", "Find Median from Data Stream", Hard, "find-median-from-data-stream"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_are_nonempty_and_linked() {
        for (name, entries) in packs() {
            assert!(!entries.is_empty(), "{name} pack is empty");
            for e in entries {
                assert!(e.link.starts_with("https://leetcode.com/problems/"));
                assert!(!e.title.is_empty());
            }
        }
    }
}

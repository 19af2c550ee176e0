use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Difficulty, Example, Language, Problem};

/// Immutable collection of practice problems. Entries are shared by
/// reference with workspaces for the lifetime of a session.
#[derive(Clone, Debug)]
pub struct Catalog {
    problems: Vec<Arc<Problem>>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            problems: vec![
                Arc::new(two_sum()),
                Arc::new(palindrome_number()),
                Arc::new(longest_substring()),
            ],
        }
    }

    pub fn problems(&self) -> &[Arc<Problem>] {
        &self.problems
    }

    pub fn by_id(&self, id: &str) -> Option<Arc<Problem>> {
        self.problems.iter().find(|p| p.id == id).cloned()
    }

    pub fn by_slug(&self, slug: &str) -> Option<Arc<Problem>> {
        self.problems.iter().find(|p| p.slug == slug).cloned()
    }
}

fn two_sum() -> Problem {
    Problem {
        id: "1".to_string(),
        title: "Two Sum".to_string(),
        slug: "two-sum".to_string(),
        difficulty: Difficulty::Easy,
        acceptance: "48.2%".to_string(),
        description: "Given an array of integers nums and an integer target, return indices of the two numbers such that they add up to target.

You may assume that each input would have exactly one solution, and you may not use the same element twice.

You can return the answer in any order."
            .to_string(),
        examples: vec![
            Example {
                input: "nums = [2,7,11,15], target = 9".to_string(),
                output: "[0,1]".to_string(),
                explanation: Some(
                    "Because nums[0] + nums[1] == 9, we return [0, 1].".to_string(),
                ),
            },
            Example {
                input: "nums = [3,2,4], target = 6".to_string(),
                output: "[1,2]".to_string(),
                explanation: None,
            },
        ],
        starter_code: HashMap::from([
            (
                Language::Python,
                "class Solution:
    def twoSum(self, nums: List[int], target: int) -> List[int]:
        # Write your code here
        pass"
                    .to_string(),
            ),
            (
                Language::Java,
                "class Solution {
    public int[] twoSum(int[] nums, int target) {
        // Write your code here

    }
}"
                .to_string(),
            ),
            (
                Language::JavaScript,
                "/**
 * @param {number[]} nums
 * @param {number} target
 * @return {number[]}
 */
var twoSum = function(nums, target) {
    // Write your code here
};"
                .to_string(),
            ),
        ]),
    }
}

fn palindrome_number() -> Problem {
    Problem {
        id: "2".to_string(),
        title: "Palindrome Number".to_string(),
        slug: "palindrome-number".to_string(),
        difficulty: Difficulty::Easy,
        acceptance: "53.1%".to_string(),
        description: "Given an integer x, return true if x is a palindrome, and false otherwise."
            .to_string(),
        examples: vec![
            Example {
                input: "x = 121".to_string(),
                output: "true".to_string(),
                explanation: Some(
                    "121 reads as 121 from left to right and from right to left.".to_string(),
                ),
            },
            Example {
                input: "x = -121".to_string(),
                output: "false".to_string(),
                explanation: Some(
                    "From left to right, it reads -121. From right to left, it becomes 121-. Therefore it is not a palindrome."
                        .to_string(),
                ),
            },
        ],
        starter_code: HashMap::from([
            (
                Language::Python,
                "class Solution:
    def isPalindrome(self, x: int) -> bool:
        # Write your code here
        pass"
                    .to_string(),
            ),
            (
                Language::Java,
                "class Solution {
    public boolean isPalindrome(int x) {
        // Write your code here

    }
}"
                .to_string(),
            ),
            (
                Language::JavaScript,
                "/**
 * @param {number} x
 * @return {boolean}
 */
var isPalindrome = function(x) {
    // Write your code here
};"
                .to_string(),
            ),
        ]),
    }
}

fn longest_substring() -> Problem {
    Problem {
        id: "3".to_string(),
        title: "Longest Substring Without Repeating Characters".to_string(),
        slug: "longest-substring".to_string(),
        difficulty: Difficulty::Medium,
        acceptance: "33.8%".to_string(),
        description:
            "Given a string s, find the length of the longest substring without repeating characters."
                .to_string(),
        examples: vec![Example {
            input: "s = \"abcabcbb\"".to_string(),
            output: "3".to_string(),
            explanation: Some("The answer is \"abc\", with the length of 3.".to_string()),
        }],
        starter_code: HashMap::from([
            (
                Language::Python,
                "class Solution:
    def lengthOfLongestSubstring(self, s: str) -> int:
        pass"
                    .to_string(),
            ),
            (
                Language::Java,
                "class Solution {
    public int lengthOfLongestSubstring(String s) {

    }
}"
                .to_string(),
            ),
            (
                Language::JavaScript,
                "/**
 * @param {string} s
 * @return {number}
 */
var lengthOfLongestSubstring = function(s) {

};"
                .to_string(),
            ),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_three_problems() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.problems().len(), 3);
    }

    #[test]
    fn every_problem_has_starter_code_for_all_languages() {
        let catalog = Catalog::builtin();
        for problem in catalog.problems() {
            for language in Language::ALL {
                assert!(
                    !problem.starter_code_for(language).is_empty(),
                    "problem {} is missing {} starter code",
                    problem.id,
                    language
                );
            }
        }
    }

    #[test]
    fn lookup_by_id_and_slug() {
        let catalog = Catalog::builtin();

        let by_id = catalog.by_id("1").unwrap();
        assert_eq!(by_id.title, "Two Sum");
        assert_eq!(by_id.difficulty, Difficulty::Easy);

        let by_slug = catalog.by_slug("palindrome-number").unwrap();
        assert_eq!(by_slug.id, "2");

        assert!(catalog.by_id("999").is_none());
    }
}

pub mod arrays;
pub mod combinatorics;
pub mod error;
pub mod matrix;
pub mod parse;
pub mod permutation;

pub use arrays::{Interval, SubarraySum, Trade};
pub use combinatorics::{binomial, factorial, multinomial};
pub use error::{KataError, KataResult};
pub use matrix::Matrix;
pub use parse::{parse_matrix, parse_vector};
pub use permutation::{
    advance, distinct_permutation_count, next_permutation, next_permutation_with, rank, unrank,
    Engine, PermutationTable, Permutations, DEFAULT_MAX_TABLE_LEN,
};

pub mod evaluate;
pub mod structural;
pub mod zscore;

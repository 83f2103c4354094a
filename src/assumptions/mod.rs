//! Actuarial assumptions: the age-indexed life expectancy table

mod life_table;
pub mod loader;

pub use life_table::{
    life_expectancy_age, years_remaining, LifeTable, LifeTableRow, SSA_2023_ROWS,
};
pub use loader::{load_life_table, load_life_table_from_reader};

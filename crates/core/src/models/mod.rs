pub mod budget;
pub mod category;
pub mod document;
pub mod family;
pub mod goal;
pub mod holding;
pub mod household;
pub mod item;
pub mod loan;
pub mod ownership;
pub mod settings;
pub mod summary;
pub mod transaction;

pub mod breakdown;
pub mod header;
pub mod history;
pub mod ledger;
pub mod plan;
pub mod statusbar;

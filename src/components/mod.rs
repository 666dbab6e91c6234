pub mod fixture_card;
pub mod format;

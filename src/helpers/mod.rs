pub mod number_helpers;
pub mod pagination_helpers;

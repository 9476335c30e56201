pub mod countdown_bar;
pub mod results;
pub mod score_history;
pub mod typing_area;

mod browsing;
mod menu;
mod playing;
mod results;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use browsing::BrowsingView;
#[cfg(test)]
pub(crate) use browsing::BrowsingTestHandles;
pub use menu::MenuView;
pub use playing::PlayingView;
pub use results::ResultsView;
pub use state::{ViewError, ViewState, view_state_from_resource};

pub mod catalog;
pub mod collections;
pub mod credentials;
pub mod providers;
pub mod ratings;
pub mod recommendations;
pub mod users;

pub use credentials::TokenKeys;
pub use providers::{CatalogProvider, TmdbProvider};
pub use recommendations::{select_recommendations, RecommendationList, RecommendationSource};

pub mod collection;
pub mod local;
pub mod movie;
pub mod rating;
pub mod user;

pub use collection::{AddItemRequest, Collection, CollectionItem, CreateCollectionRequest};
pub use local::{LocalCollection, LocalRating};
pub use movie::{CastMember, Credits, CrewMember, Genre, Movie, MovieDetails, Paged};
pub use rating::{Rating, RatingInput, RatingRequest};
pub use user::{AuthResponse, LoginRequest, PublicUser, RegisterRequest, User};

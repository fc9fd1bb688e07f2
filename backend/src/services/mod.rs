pub mod connections;
pub mod posts;
pub mod users;

pub use connections::ConnectionService;
pub use posts::PostService;
pub use users::UserService;

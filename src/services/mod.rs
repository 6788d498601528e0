pub mod auth;
pub mod questions;
pub mod responses;
pub mod rooms;
pub mod system;
pub mod users;

pub use auth::AuthService;
pub use questions::QuestionService;
pub use responses::ResponseService;
pub use rooms::RoomService;
pub use system::SystemService;
pub use users::UserService;

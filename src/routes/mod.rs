pub mod auth;

pub mod users;

pub mod questions;

pub mod rooms;

pub mod responses;

pub mod system;

pub mod frontend;

pub use auth::configure_auth_routes;
pub use frontend::configure_frontend_routes;
pub use questions::configure_question_routes;
pub use responses::configure_response_routes;
pub use rooms::configure_room_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;

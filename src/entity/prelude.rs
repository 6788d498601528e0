//! 预导入模块，方便使用

pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::rooms::{ActiveModel as RoomActiveModel, Entity as Rooms, Model as RoomModel};
pub use super::student_responses::{
    ActiveModel as StudentResponseActiveModel, Entity as StudentResponses,
    Model as StudentResponseModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};

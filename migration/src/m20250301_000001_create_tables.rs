use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::ProfileName).string().null())
                    .col(ColumnDef::new(Users::AvatarUrl).string().null())
                    .col(ColumnDef::new(Users::School).string().null())
                    .col(ColumnDef::new(Users::Department).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建题目表
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Questions::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Questions::QuestionText).text().not_null())
                    .col(
                        ColumnDef::new(Questions::QuestionType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Questions::Choices).text().null())
                    .col(ColumnDef::new(Questions::CorrectAnswer).boolean().null())
                    .col(ColumnDef::new(Questions::Pairs).text().null())
                    .col(ColumnDef::new(Questions::CorrectAnswers).text().null())
                    .col(ColumnDef::new(Questions::Topic).string().not_null())
                    .col(ColumnDef::new(Questions::Difficulty).string().not_null())
                    .col(
                        ColumnDef::new(Questions::Points)
                            .double()
                            .not_null()
                            .default(1.0),
                    )
                    .col(ColumnDef::new(Questions::Explanation).text().null())
                    .col(ColumnDef::new(Questions::Tags).text().null())
                    .col(
                        ColumnDef::new(Questions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Questions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Questions::Table, Questions::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建测验房间表
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rooms::TeacherId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Rooms::RoomCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Rooms::Title).string().not_null())
                    .col(ColumnDef::new(Rooms::Description).text().null())
                    .col(ColumnDef::new(Rooms::QuestionIds).text().not_null())
                    .col(ColumnDef::new(Rooms::Settings).text().not_null())
                    .col(ColumnDef::new(Rooms::Status).string().not_null())
                    .col(ColumnDef::new(Rooms::StartDate).big_integer().null())
                    .col(ColumnDef::new(Rooms::EndDate).big_integer().null())
                    .col(ColumnDef::new(Rooms::ExpiresAt).big_integer().not_null())
                    .col(
                        ColumnDef::new(Rooms::TotalParticipants)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Rooms::TotalSubmissions)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Rooms::AverageScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Rooms::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Rooms::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Rooms::Table, Rooms::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生答卷表
        manager
            .create_table(
                Table::create()
                    .table(StudentResponses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentResponses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentResponses::RoomId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentResponses::StudentName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentResponses::StudentLrn).string().null())
                    .col(
                        ColumnDef::new(StudentResponses::StudentSection)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentResponses::StudentEmail)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(StudentResponses::Answers).text().not_null())
                    .col(
                        ColumnDef::new(StudentResponses::TotalScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(StudentResponses::MaxScore)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentResponses::Percentage)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(StudentResponses::Status).string().not_null())
                    .col(
                        ColumnDef::new(StudentResponses::StartedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentResponses::SubmittedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentResponses::TotalTimeSpent)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(StudentResponses::IpAddress)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentResponses::UserAgent)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentResponses::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentResponses::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentResponses::Table, StudentResponses::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 用户表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_username")
                    .table(Users::Table)
                    .col(Users::Username)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .to_owned(),
            )
            .await?;

        // 题目表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_questions_teacher_id")
                    .table(Questions::Table)
                    .col(Questions::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_questions_teacher_topic")
                    .table(Questions::Table)
                    .col(Questions::TeacherId)
                    .col(Questions::Topic)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_questions_difficulty")
                    .table(Questions::Table)
                    .col(Questions::Difficulty)
                    .to_owned(),
            )
            .await?;

        // 房间表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_rooms_room_code")
                    .table(Rooms::Table)
                    .col(Rooms::RoomCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_rooms_teacher_status")
                    .table(Rooms::Table)
                    .col(Rooms::TeacherId)
                    .col(Rooms::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_rooms_expires_at")
                    .table(Rooms::Table)
                    .col(Rooms::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        // 答卷表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_responses_room_status")
                    .table(StudentResponses::Table)
                    .col(StudentResponses::RoomId)
                    .col(StudentResponses::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_responses_submitted_at")
                    .table(StudentResponses::Table)
                    .col(StudentResponses::SubmittedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(StudentResponses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    ProfileName,
    AvatarUrl,
    School,
    Department,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Questions {
    #[sea_orm(iden = "questions")]
    Table,
    Id,
    TeacherId,
    QuestionText,
    QuestionType,
    Choices,
    CorrectAnswer,
    Pairs,
    CorrectAnswers,
    Topic,
    Difficulty,
    Points,
    Explanation,
    Tags,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Rooms {
    #[sea_orm(iden = "rooms")]
    Table,
    Id,
    TeacherId,
    RoomCode,
    Title,
    Description,
    QuestionIds,
    Settings,
    Status,
    StartDate,
    EndDate,
    ExpiresAt,
    TotalParticipants,
    TotalSubmissions,
    AverageScore,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentResponses {
    #[sea_orm(iden = "student_responses")]
    Table,
    Id,
    RoomId,
    StudentName,
    StudentLrn,
    StudentSection,
    StudentEmail,
    Answers,
    TotalScore,
    MaxScore,
    Percentage,
    Status,
    StartedAt,
    SubmittedAt,
    TotalTimeSpent,
    IpAddress,
    UserAgent,
    CreatedAt,
    UpdatedAt,
}

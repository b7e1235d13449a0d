use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn uuid_pk<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).uuid().not_null().primary_key().to_owned()
}

fn timestamp<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

fn nullable_timestamp<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).timestamp_with_time_zone().null().to_owned()
}

fn text<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).string().not_null().to_owned()
}

fn nullable_text<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).string().null().to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(uuid_pk(Customers::Id))
                    .col(text(Customers::FullName))
                    .col(nullable_text(Customers::Email))
                    .col(nullable_text(Customers::Phone))
                    .col(ColumnDef::new(Customers::Birthday).date().null())
                    .col(nullable_text(Customers::Notes))
                    .col(
                        ColumnDef::new(Customers::LoyaltyPoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(timestamp(Customers::CreatedAt))
                    .col(timestamp(Customers::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_customers_email")
                    .table(Customers::Table)
                    .col(Customers::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(uuid_pk(Appointments::Id))
                    .col(ColumnDef::new(Appointments::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(Appointments::EmployeeId).uuid().null())
                    .col(text(Appointments::Service))
                    .col(timestamp(Appointments::StartsAt))
                    .col(timestamp(Appointments::EndsAt))
                    .col(ColumnDef::new(Appointments::Price).double().null())
                    .col(text(Appointments::Status))
                    .col(nullable_text(Appointments::Notes))
                    .col(
                        ColumnDef::new(Appointments::IsLateCancellation)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(nullable_text(Appointments::CancellationReason))
                    .col(nullable_timestamp(Appointments::CancelledAt))
                    .col(timestamp(Appointments::CreatedAt))
                    .col(timestamp(Appointments::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_customer_id")
                            .from(Appointments::Table, Appointments::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_appointments_starts_at")
                    .table(Appointments::Table)
                    .col(Appointments::StartsAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InventoryItems::Table)
                    .if_not_exists()
                    .col(uuid_pk(InventoryItems::Id))
                    .col(text(InventoryItems::Name))
                    .col(nullable_text(InventoryItems::Category))
                    .col(
                        ColumnDef::new(InventoryItems::Quantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(InventoryItems::MinQuantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(InventoryItems::UnitPrice).double().not_null())
                    .col(nullable_text(InventoryItems::Supplier))
                    .col(timestamp(InventoryItems::CreatedAt))
                    .col(timestamp(InventoryItems::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(uuid_pk(Expenses::Id))
                    .col(text(Expenses::Description))
                    .col(text(Expenses::Category))
                    .col(ColumnDef::new(Expenses::Amount).double().not_null())
                    .col(ColumnDef::new(Expenses::SpentOn).date().not_null())
                    .col(timestamp(Expenses::CreatedAt))
                    .col(timestamp(Expenses::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Revenues::Table)
                    .if_not_exists()
                    .col(uuid_pk(Revenues::Id))
                    .col(text(Revenues::Description))
                    .col(text(Revenues::Category))
                    .col(ColumnDef::new(Revenues::Amount).double().not_null())
                    .col(ColumnDef::new(Revenues::ReceivedOn).date().not_null())
                    .col(ColumnDef::new(Revenues::AppointmentId).uuid().null())
                    .col(timestamp(Revenues::CreatedAt))
                    .col(timestamp(Revenues::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(uuid_pk(Tasks::Id))
                    .col(text(Tasks::Title))
                    .col(nullable_text(Tasks::Description))
                    .col(text(Tasks::Status))
                    .col(ColumnDef::new(Tasks::AssigneeId).uuid().null())
                    .col(ColumnDef::new(Tasks::DueOn).date().null())
                    .col(timestamp(Tasks::CreatedAt))
                    .col(timestamp(Tasks::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MarketingTemplates::Table)
                    .if_not_exists()
                    .col(uuid_pk(MarketingTemplates::Id))
                    .col(text(MarketingTemplates::Name))
                    .col(text(MarketingTemplates::Channel))
                    .col(nullable_text(MarketingTemplates::Subject))
                    .col(ColumnDef::new(MarketingTemplates::Body).text().not_null())
                    .col(timestamp(MarketingTemplates::CreatedAt))
                    .col(timestamp(MarketingTemplates::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Campaigns::Table)
                    .if_not_exists()
                    .col(uuid_pk(Campaigns::Id))
                    .col(text(Campaigns::Name))
                    .col(ColumnDef::new(Campaigns::TemplateId).uuid().null())
                    .col(text(Campaigns::Channel))
                    .col(text(Campaigns::Status))
                    .col(nullable_timestamp(Campaigns::ScheduledAt))
                    .col(nullable_timestamp(Campaigns::SentAt))
                    .col(timestamp(Campaigns::CreatedAt))
                    .col(timestamp(Campaigns::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Coupons::Table)
                    .if_not_exists()
                    .col(uuid_pk(Coupons::Id))
                    .col(ColumnDef::new(Coupons::Code).string().not_null().unique_key())
                    .col(nullable_text(Coupons::Description))
                    .col(ColumnDef::new(Coupons::DiscountPercent).integer().not_null())
                    .col(ColumnDef::new(Coupons::ValidFrom).date().null())
                    .col(ColumnDef::new(Coupons::ValidUntil).date().null())
                    .col(
                        ColumnDef::new(Coupons::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(timestamp(Coupons::CreatedAt))
                    .col(timestamp(Coupons::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(uuid_pk(Notifications::Id))
                    .col(ColumnDef::new(Notifications::UserId).uuid().null())
                    .col(text(Notifications::Title))
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(
                        ColumnDef::new(Notifications::Read)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp(Notifications::CreatedAt))
                    .col(timestamp(Notifications::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SocialPosts::Table)
                    .if_not_exists()
                    .col(uuid_pk(SocialPosts::Id))
                    .col(text(SocialPosts::Platform))
                    .col(ColumnDef::new(SocialPosts::Content).text().not_null())
                    .col(nullable_text(SocialPosts::ImageUrl))
                    .col(text(SocialPosts::Status))
                    .col(nullable_timestamp(SocialPosts::ScheduledAt))
                    .col(nullable_timestamp(SocialPosts::PublishedAt))
                    .col(timestamp(SocialPosts::CreatedAt))
                    .col(timestamp(SocialPosts::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SocialPosts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Coupons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Campaigns::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MarketingTemplates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Revenues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InventoryItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
    FullName,
    Email,
    Phone,
    Birthday,
    Notes,
    LoyaltyPoints,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Appointments {
    Table,
    Id,
    CustomerId,
    EmployeeId,
    Service,
    StartsAt,
    EndsAt,
    Price,
    Status,
    Notes,
    IsLateCancellation,
    CancellationReason,
    CancelledAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum InventoryItems {
    Table,
    Id,
    Name,
    Category,
    Quantity,
    MinQuantity,
    UnitPrice,
    Supplier,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    Description,
    Category,
    Amount,
    SpentOn,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Revenues {
    Table,
    Id,
    Description,
    Category,
    Amount,
    ReceivedOn,
    AppointmentId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    Status,
    AssigneeId,
    DueOn,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MarketingTemplates {
    Table,
    Id,
    Name,
    Channel,
    Subject,
    Body,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Campaigns {
    Table,
    Id,
    Name,
    TemplateId,
    Channel,
    Status,
    ScheduledAt,
    SentAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Coupons {
    Table,
    Id,
    Code,
    Description,
    DiscountPercent,
    ValidFrom,
    ValidUntil,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    UserId,
    Title,
    Message,
    Read,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SocialPosts {
    Table,
    Id,
    Platform,
    Content,
    ImageUrl,
    Status,
    ScheduledAt,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}

//! CRUD endpoints of the business tables
//!
//! Every table gets the same five routes; each one checks the permission of
//! the table's resource before touching the database (read for listing,
//! write for create and edit, delete for delete).

use crate::auth::rbac::PermissionKind;
use crate::server::middleware::AuthenticatedUser;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::storage::database::entities::{
    appointment, campaign, coupon, customer, expense, inventory_item, marketing_template,
    notification, revenue, social_post, task,
};
use crate::storage::{RecordFilter, SalonRecord};
use actix_web::{HttpResponse, Result as ActixResult, web};
use sea_orm::IntoActiveModel;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

/// Configure the record routes (mounted under `/api`)
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    table::<customer::Model>(cfg, "/customers");
    table::<appointment::Model>(cfg, "/appointments");
    table::<inventory_item::Model>(cfg, "/inventory");
    table::<expense::Model>(cfg, "/expenses");
    table::<revenue::Model>(cfg, "/revenues");
    table::<task::Model>(cfg, "/tasks");
    table::<marketing_template::Model>(cfg, "/marketing/templates");
    table::<campaign::Model>(cfg, "/marketing/campaigns");
    table::<coupon::Model>(cfg, "/coupons");
    table::<social_post::Model>(cfg, "/social-posts");
    table::<notification::Model>(cfg, "/notifications");
}

fn table<R>(cfg: &mut web::ServiceConfig, path: &str)
where
    R: SalonRecord + IntoActiveModel<R::Active>,
{
    cfg.service(
        web::scope(path)
            .route("", web::get().to(list::<R>))
            .route("", web::post().to(create::<R>))
            .route("/{id}", web::get().to(get::<R>))
            .route("/{id}", web::put().to(update::<R>))
            .route("/{id}", web::delete().to(delete::<R>)),
    );
}

async fn list<R>(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    filter: web::Query<RecordFilter>,
) -> ActixResult<HttpResponse>
where
    R: SalonRecord + IntoActiveModel<R::Active>,
{
    user.require(&state, R::RESOURCE, PermissionKind::Read).await?;
    let rows = state.storage.records::<R>().list(&filter).await?;
    let meta = json!({ "total": rows.len() });
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_meta(rows, meta)))
}

async fn get<R>(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
) -> ActixResult<HttpResponse>
where
    R: SalonRecord + IntoActiveModel<R::Active>,
{
    user.require(&state, R::RESOURCE, PermissionKind::Read).await?;
    let row = state.storage.records::<R>().get(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(row)))
}

async fn create<R>(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    input: web::Json<R::Input>,
) -> ActixResult<HttpResponse>
where
    R: SalonRecord + IntoActiveModel<R::Active>,
{
    user.require(&state, R::RESOURCE, PermissionKind::Write).await?;
    let row = state.storage.records::<R>().insert(input.into_inner()).await?;
    info!("User {} created {} {}", user.user_id(), R::NAME, row.id());
    Ok(HttpResponse::Created().json(ApiResponse::success(row)))
}

async fn update<R>(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
    input: web::Json<R::Input>,
) -> ActixResult<HttpResponse>
where
    R: SalonRecord + IntoActiveModel<R::Active>,
{
    user.require(&state, R::RESOURCE, PermissionKind::Write).await?;
    let row = state
        .storage
        .records::<R>()
        .update(id.into_inner(), input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(row)))
}

async fn delete<R>(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
) -> ActixResult<HttpResponse>
where
    R: SalonRecord + IntoActiveModel<R::Active>,
{
    user.require(&state, R::RESOURCE, PermissionKind::Delete).await?;
    let id = id.into_inner();
    state.storage.records::<R>().delete(id).await?;
    info!("User {} deleted {} {}", user.user_id(), R::NAME, id);
    Ok(HttpResponse::Ok().json(ApiResponse::done()))
}

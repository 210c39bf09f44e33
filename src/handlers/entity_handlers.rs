// 平台实体API处理器
// 店铺、医院、教育机构、市场商品的列表搜索以及冻结、解冻、删除

use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{bad_gateway, bad_request, not_found};
use crate::models::{
    ApiResponse, EntityCommand, EntityKind, Hospital, Institute, ManagedEntity, Product, Shop,
};
use crate::state::AppState;
use crate::utils::validate_record_id;

/// 实体列表查询参数
#[derive(Debug, Deserialize)]
pub struct EntitySearchQuery {
    pub search: Option<String>,
}

/// 实体列表响应
#[derive(Debug, Serialize)]
pub struct EntityListResponse<T> {
    pub total: usize,
    pub items: Vec<T>,
}

/// 获取并按搜索词过滤某类实体
async fn search_entities<T>(data: &AppState, query: &str) -> HttpResponse
where
    T: ManagedEntity + DeserializeOwned + Serialize,
{
    match data.entities.search::<T>(query).await {
        Ok(items) => HttpResponse::Ok().json(ApiResponse::success(EntityListResponse {
            total: items.len(),
            items,
        })),
        Err(_) => bad_gateway(&format!("Failed to fetch {}", T::KIND.plural())),
    }
}

/// 执行实体命令并生成响应
pub(crate) async fn run_command(
    data: &AppState,
    kind: EntityKind,
    id: &str,
    command: EntityCommand,
) -> HttpResponse {
    if let Err(e) = validate_record_id(id) {
        return bad_request(&e.to_string());
    }

    match data.entities.execute(kind, id, command).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success_with_message(
            id.to_string(),
            &format!("{} {}", kind.singular(), command.past_tense()),
        )),
        Err(e) => {
            let message = e
                .backend_message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Failed to {} {}", command.as_str(), kind.singular()));
            bad_gateway(&message)
        }
    }
}

/// 解析路径中的实体种类 (用户走单独的接口)
fn parse_kind(value: &str) -> Option<EntityKind> {
    EntityKind::parse(value).filter(|kind| *kind != EntityKind::User)
}

/// 获取实体列表
///
/// GET /api/panel/entities/{kind}?search=
pub async fn list_entities(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<EntitySearchQuery>,
) -> ActixResult<HttpResponse> {
    let search = query.search.as_deref().unwrap_or_default();

    let response = match parse_kind(&path) {
        Some(EntityKind::Shop) => search_entities::<Shop>(&data, search).await,
        Some(EntityKind::Hospital) => search_entities::<Hospital>(&data, search).await,
        Some(EntityKind::Institute) => search_entities::<Institute>(&data, search).await,
        Some(EntityKind::Product) => search_entities::<Product>(&data, search).await,
        _ => not_found(&format!("Unknown entity kind: {}", path.as_str())),
    };

    Ok(response)
}

/// 冻结实体
///
/// PUT /api/panel/entities/{kind}/{id}/freeze
pub async fn freeze_entity(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    entity_command(&data, path.into_inner(), EntityCommand::Freeze).await
}

/// 解冻实体
///
/// PUT /api/panel/entities/{kind}/{id}/unfreeze
pub async fn unfreeze_entity(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    entity_command(&data, path.into_inner(), EntityCommand::Unfreeze).await
}

/// 删除实体
///
/// DELETE /api/panel/entities/{kind}/{id}
pub async fn delete_entity(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    entity_command(&data, path.into_inner(), EntityCommand::Delete).await
}

async fn entity_command(
    data: &AppState,
    (kind, id): (String, String),
    command: EntityCommand,
) -> ActixResult<HttpResponse> {
    match parse_kind(&kind) {
        Some(kind) => Ok(run_command(data, kind, &id, command).await),
        None => Ok(not_found(&format!("Unknown entity kind: {}", kind))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_backend;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    async fn backend() -> String {
        spawn_backend(|cfg| {
            cfg.route(
                "/api/admin/institutes",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!({
                        "institutes": [
                            { "_id": "i1", "name": "Punjab College", "type": "College", "city": "Lahore",
                              "specialization": "Computer Science", "approvalStatus": "approved" },
                            { "_id": "i2", "name": "Indus Academy", "type": "School", "city": "Karachi",
                              "approvalStatus": "pending" }
                        ]
                    }))
                }),
            )
            .route(
                "/api/admin/shop/{id}/freeze",
                web::put().to(|| async { HttpResponse::Ok().json(json!({ "message": "Shop frozen" })) }),
            )
            .route(
                "/api/admin/hospital/{id}",
                web::delete().to(|| async {
                    HttpResponse::NotFound().json(json!({ "error": "Hospital not found" }))
                }),
            );
        })
        .await
    }

    macro_rules! panel_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .route("/api/panel/entities/{kind}", web::get().to(list_entities))
                    .route("/api/panel/entities/{kind}/{id}/freeze", web::put().to(freeze_entity))
                    .route("/api/panel/entities/{kind}/{id}/unfreeze", web::put().to(unfreeze_entity))
                    .route("/api/panel/entities/{kind}/{id}", web::delete().to(delete_entity)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_list_with_search() {
        let state = web::Data::new(AppState::new_for_test(&backend().await));
        let app = panel_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/panel/entities/institutes?search=computer")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["_id"], "i1");

        let req = test::TestRequest::get().uri("/api/panel/entities/institutes").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["total"], 2);
    }

    #[actix_web::test]
    async fn test_unknown_kind_is_not_found() {
        let state = web::Data::new(AppState::new_for_test(&backend().await));
        let app = panel_app!(state);

        let req = test::TestRequest::get().uri("/api/panel/entities/spaceships").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);

        let req = test::TestRequest::put().uri("/api/panel/entities/users/u1/freeze").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }

    #[actix_web::test]
    async fn test_commands() {
        let state = web::Data::new(AppState::new_for_test(&backend().await));
        let app = panel_app!(state);

        let req = test::TestRequest::put().uri("/api/panel/entities/shops/s1/freeze").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "shop frozen");
        assert_eq!(body["data"], "s1");

        let req = test::TestRequest::delete().uri("/api/panel/entities/hospitals/h1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 502);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Hospital not found");

        let messages: Vec<String> = state.notices.drain().into_iter().map(|n| n.message).collect();
        assert_eq!(
            messages,
            vec!["Shop frozen successfully".to_string(), "Failed to delete hospital".to_string()]
        );
    }
}

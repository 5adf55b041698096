use serde::Deserialize;
use utoipa::{IntoParams, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct UserDoc {
    pub id: i32,
    pub uname: String,
    pub fname: String,
    pub lname: Option<String>,
    pub email: Option<String>,
}

#[derive(ToSchema)]
pub struct NewUserDoc {
    pub uname: String,
    pub password: String,
    pub fname: String,
    pub lname: Option<String>,
    pub email: Option<String>,
}

#[derive(ToSchema)]
pub struct UserPatchDoc {
    pub uname: Option<String>,
    pub password: Option<String>,
    pub fname: Option<String>,
    pub lname: Option<String>,
    pub email: Option<String>,
}

#[derive(ToSchema)]
pub struct LoginRequest { pub uname: String, pub password: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct LoginSuccessDoc {
    pub success: bool,
    pub user_id: i32,
    pub username: String,
    pub full_name: String,
    pub token: Option<String>,
}

#[derive(ToSchema)]
pub struct LoginFailureDoc { pub success: bool, pub message: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ProductDoc {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub price: i32,
    pub product_type: String,
    pub brand: Option<String>,
    pub part_type: Option<String>,
    pub bike_model: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct NewProductDoc {
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub price: i32,
    /// `accessory` (default) or `spare part`
    pub product_type: Option<String>,
    pub brand: Option<String>,
    pub part_type: Option<String>,
    pub bike_model: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ProductPatchDoc {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub price: Option<i32>,
    pub product_type: Option<String>,
    pub brand: Option<String>,
    pub part_type: Option<String>,
    pub bike_model: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
#[allow(dead_code)]
pub struct ProductQueryDoc {
    pub product_type: Option<String>,
    pub brand: Option<String>,
    pub part_type: Option<String>,
    pub bike_model: Option<String>,
    /// Case-insensitive substring over name and description
    pub q: Option<String>,
    /// 1-based; omit to get every match
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::create,
        crate::routes::users::list,
        crate::routes::users::get,
        crate::routes::users::get_by_username,
        crate::routes::users::update,
        crate::routes::users::delete,
        crate::routes::users::login,
        crate::routes::products::create,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            HealthResponse,
            UserDoc,
            NewUserDoc,
            UserPatchDoc,
            LoginRequest,
            LoginSuccessDoc,
            LoginFailureDoc,
            ProductDoc,
            NewProductDoc,
            ProductPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "user"),
        (name = "auth"),
        (name = "product")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_user_and_product_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for p in ["/user/login", "/user/{id}", "/product/getall", "/product/{id}"] {
            assert!(paths.iter().any(|k| k.as_str() == p), "missing {p}");
        }
    }
}

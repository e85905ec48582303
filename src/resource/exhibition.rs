use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{create_record, created, ensure_exists};
use crate::auth::RequireStaff;
use crate::backend::{quote_ident, Row, SqlValue};
use crate::error::{AppError, AppResult};
use crate::extractors::JsonBody;
use crate::models::ChangeArtworkRequest;
use crate::schema::definitions::{
    ARTWORK, ARTWORK_REF, EXHIBITION, EXHIBITION_ARTWORK, EXHIBITION_REF, EXHIBITION_STAFF,
    SPECIAL_EXHIBITION, SPECIAL_EXHIBITION_STAFF,
};
use crate::schema::validation::{coerce, is_present};
use crate::schema::{FieldKind, FieldSpec, ResourceSchema, MISSING_FIELDS};
use crate::state::AppState;

/// A table that can be listed with `GET /exhibitions?type=<type_name>`
#[derive(Debug)]
pub struct Listing {
    pub type_name: &'static str,
    pub table: &'static str,
    pub failure: &'static str,
}

pub const DEFAULT_LISTING: &str = "artworks";

pub const LISTINGS: &[Listing] = &[
    Listing {
        type_name: "artworks",
        table: "artworks",
        failure: "Error retrieving artworks",
    },
    Listing {
        type_name: "exhibitions",
        table: "exhibitions",
        failure: "Error retrieving exhibitions",
    },
    Listing {
        type_name: "exhibitions_artworks",
        table: "exhibitions_artworks",
        failure: "Error retrieving exhibition artworks",
    },
    Listing {
        type_name: "special_exhibitions",
        table: "special_exhibitions",
        failure: "Error retrieving special exhibitions",
    },
    Listing {
        type_name: "exhibition_staff",
        table: "exhibition_staff",
        failure: "Error retrieving exhibition staff",
    },
    Listing {
        type_name: "special_exhibition_staff",
        table: "special_exhibition_staff",
        failure: "Error retrieving special exhibition staff",
    },
];

pub fn find_listing(type_name: Option<&str>) -> AppResult<&'static Listing> {
    let type_name = type_name.unwrap_or(DEFAULT_LISTING);
    LISTINGS
        .iter()
        .find(|listing| listing.type_name == type_name)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid type parameter: {}", type_name)))
}

/// A `POST /exhibitions/...` route bound to the schema of its table
#[derive(Debug)]
pub struct InsertRoute {
    pub path: &'static str,
    pub schema: &'static ResourceSchema,
    pub success: &'static str,
    pub failure: &'static str,
}

pub const INSERT_ROUTES: &[InsertRoute] = &[
    InsertRoute {
        path: "/exhibitions/Addartworks",
        schema: &ARTWORK,
        success: "artwork added successfully!",
        failure: "Error adding artwork",
    },
    InsertRoute {
        path: "/exhibitions/AddExhibitionArtwork",
        schema: &EXHIBITION_ARTWORK,
        success: "artwork added to an exhibition artworks successfully!",
        failure: "Error adding artwork to an exhibition",
    },
    InsertRoute {
        path: "/exhibitions/AddExhibitionStaff",
        schema: &EXHIBITION_STAFF,
        success: "exhibition staff added successfully!",
        failure: "Error adding a staff member to an exhibition",
    },
    InsertRoute {
        path: "/exhibitions/AddExhibition",
        schema: &EXHIBITION,
        success: "exhibition added successfully!",
        failure: "Error adding an exhibition",
    },
    InsertRoute {
        path: "/exhibitions/AddSpecialExhibitionStaff",
        schema: &SPECIAL_EXHIBITION_STAFF,
        success: "special exhibition staff member added successfully!",
        failure: "Error adding a special exhibition staff member",
    },
    InsertRoute {
        path: "/exhibitions/AddSpecialExhibition",
        schema: &SPECIAL_EXHIBITION,
        success: "special exhibition added successfully!",
        failure: "Error adding a special exhibition",
    },
];

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "type")]
    pub type_name: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Row>>> {
    let listing = find_listing(query.type_name.as_deref())?;

    let rows = state
        .gateway
        .fetch_all(&format!("SELECT * FROM {}", quote_ident(listing.table)), &[])
        .await
        .map_err(|e| e.in_context(listing.failure))?;

    Ok(Json(rows))
}

async fn insert(
    state: AppState,
    route: &'static InsertRoute,
    staff_id: i64,
    body: Value,
) -> AppResult<(StatusCode, Json<Value>)> {
    let inserted_id = create_record(state.gateway.as_ref(), route.schema, &body, route.failure).await?;

    tracing::info!(
        staff_id,
        table = route.schema.table,
        inserted_id,
        "Inserted {}",
        route.schema.name
    );
    Ok(created(route.success, inserted_id))
}

#[derive(Debug, Deserialize)]
pub struct ChangeArtworkQuery {
    pub id: Option<String>,
}

const NEW_ARTWORK_ID: FieldSpec =
    FieldSpec::required("newArtwork.id", "Artwork_ID", FieldKind::Identifier);
const REPLACED_ARTWORK_ID: FieldSpec =
    FieldSpec::optional("replaces", "Artwork_ID", FieldKind::Identifier);

fn identifier(field: &FieldSpec, raw: &Value) -> AppResult<i64> {
    match coerce(field, raw)? {
        SqlValue::Integer(id) => Ok(id),
        _ => Err(AppError::BadRequest(MISSING_FIELDS.to_string())),
    }
}

/// Link a different artwork to an exhibition.
///
/// With `replaces` the existing link is re-pointed, otherwise a new link is
/// added. The query and body are fully validated before the database is
/// touched.
pub async fn change_artwork(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Query(query): Query<ChangeArtworkQuery>,
    JsonBody(request): JsonBody<ChangeArtworkRequest>,
) -> AppResult<Json<Value>> {
    let exhibition_id = query
        .id
        .as_deref()
        .and_then(|id| id.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest("A valid exhibition id is required".to_string()))?;

    let new_artwork = request
        .new_artwork
        .ok_or_else(|| AppError::BadRequest(MISSING_FIELDS.to_string()))?;
    let artwork_id = match new_artwork.id.as_ref() {
        Some(raw) if is_present(Some(raw)) => identifier(&NEW_ARTWORK_ID, raw)?,
        _ => return Err(AppError::BadRequest(MISSING_FIELDS.to_string())),
    };
    let replaces = request
        .replaces
        .as_ref()
        .filter(|raw| !raw.is_null())
        .map(|raw| identifier(&REPLACED_ARTWORK_ID, raw))
        .transpose()?;

    let exhibition = state
        .gateway
        .fetch_optional(&EXHIBITION_REF.exists_sql(), &[SqlValue::Integer(exhibition_id)])
        .await
        .map_err(|e| e.in_context("Error retrieving exhibition"))?;
    if exhibition.is_none() {
        return Err(AppError::NotFound("Exhibition not found".to_string()));
    }

    ensure_exists(state.gateway.as_ref(), &ARTWORK_REF, artwork_id).await?;

    match replaces {
        Some(previous) => {
            let sql = format!(
                "UPDATE {} SET {} = ? WHERE {} = ? AND {} = ?",
                quote_ident(EXHIBITION_ARTWORK.table),
                quote_ident("Artwork_ID"),
                quote_ident("Exhibition_ID"),
                quote_ident("Artwork_ID")
            );
            let affected = state
                .gateway
                .execute(
                    &sql,
                    &[
                        SqlValue::Integer(artwork_id),
                        SqlValue::Integer(exhibition_id),
                        SqlValue::Integer(previous),
                    ],
                )
                .await
                .map_err(|e| e.in_context("Error updating exhibition artwork"))?;

            if affected == 0 {
                return Err(AppError::NotFound(format!(
                    "Artwork {} is not part of exhibition {}",
                    previous, exhibition_id
                )));
            }
        }
        None => {
            state
                .gateway
                .insert(
                    &EXHIBITION_ARTWORK.insert_sql(),
                    &[
                        SqlValue::Integer(exhibition_id),
                        SqlValue::Integer(artwork_id),
                    ],
                    EXHIBITION_ARTWORK.key_column,
                )
                .await
                .map_err(|e| e.in_context("Error updating exhibition artwork"))?;
        }
    }

    tracing::info!(
        staff_id = user.staff_id,
        exhibition_id,
        artwork_id,
        replaces = ?replaces,
        title = new_artwork.name.as_deref().unwrap_or("-"),
        "Changed exhibition artwork"
    );

    Ok(Json(json!({
        "message": "exhibition artwork updated successfully!",
        "exhibitionId": exhibition_id,
        "artworkId": artwork_id,
    })))
}

pub fn routes() -> Router<AppState> {
    let mut router = Router::new()
        .route("/exhibitions", get(list))
        .route("/exhibitions/changeArtwork", put(change_artwork));

    for route in INSERT_ROUTES {
        router = router.route(
            route.path,
            post(
                move |State(state): State<AppState>,
                      RequireStaff(user): RequireStaff,
                      JsonBody(body): JsonBody<Value>| async move {
                    insert(state, route, user.staff_id, body).await
                },
            ),
        );
    }

    router
}

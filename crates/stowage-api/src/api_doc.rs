//! OpenAPI documentation.
//! API version is in `crate::constants::API_VERSION`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

/// Returns the OpenAPI spec served at /api/openapi.json.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stowage API",
        version = "0.1.0",
        description = "Web front end for a cloud object-storage container: upload, download, and list files, plus text snippet storage. All endpoints are versioned under /api/v0/."
    ),
    paths(
        handlers::file_list::list_files,
        handlers::file_upload::upload_file,
        handlers::file_download::download_file,
        handlers::text_save::save_text,
    ),
    components(
        schemas(
            handlers::file_list::FileListResponse,
            handlers::file_upload::UploadResponse,
            handlers::text_save::SaveTextRequest,
            handlers::text_save::SaveTextResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "files", description = "File upload, listing, and download operations"),
        (name = "text", description = "Text snippet storage operations")
    )
)]
pub struct ApiDoc;

//! OpenAPI documentation and schema generation
//!
//! This module defines the OpenAPI specification for the logslice REST API
//! using utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the logslice REST API
///
/// This struct is used to generate the OpenAPI specification that describes
/// all available endpoints, request/response types, and API behavior.
///
/// The spec can be accessed via:
/// - `/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "logslice REST API",
        version = "0.1.0",
        description = "REST API for submitting asynchronous date-filtered log extractions, polling their status, and downloading the produced files",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    paths(
        // Tasks
        crate::api::routes::submit_task,
        crate::api::routes::get_task_status,
        crate::api::routes::download_task_file,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
        crate::api::routes::event_stream,
    ),
    components(schemas(
        crate::types::TaskId,
        crate::types::TaskStatus,
        crate::types::LogTask,
        crate::api::routes::SubmitTaskQuery,
        crate::api::routes::SubmitTaskResponse,
        crate::error::ApiError,
        crate::error::ErrorDetail,
        crate::config::Config,
        crate::config::ApiConfig,
    )),
    tags(
        (name = "tasks", description = "Asynchronous log extraction tasks"),
        (name = "system", description = "Health, events, and API documentation")
    )
)]
pub struct ApiDoc;

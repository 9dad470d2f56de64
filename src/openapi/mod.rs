use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = r#"
# Product Catalog API

Read access to the product catalog and intake for visitor contact messages
and product inquiries.

- Product responses are cached for 15 minutes per client cookie.
- Every submission is forwarded to the site administrator by email. When that
  email cannot be sent the submission is still stored and the response
  carries a `warning`.
- Errors share one envelope: `{ "status": "error", "message": ..., "errors": ... }`.
"#
    ),
    paths(
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::submissions::submit_contact,
        crate::handlers::submissions::submit_inquiry,
        crate::health::health_check,
    ),
    components(schemas(crate::errors::ErrorResponse, crate::errors::FieldErrors)),
    tags(
        (name = "Products", description = "Catalog listing and detail"),
        (name = "Submissions", description = "Contact form and product inquiries"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_every_public_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/products/",
            "/products/{id}/",
            "/contact-us/",
            "/inquiry/",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}

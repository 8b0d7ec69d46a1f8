use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Product catalog with filtered search and partial updates, plus factory ignition tests"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/products", api = domain_products::ApiDoc),
        (path = "/factory-tests", api = domain_ignition::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_paths_are_nested() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/products/{id}"), "{paths:?}");
        assert!(paths.iter().any(|p| p.as_str() == "/factory-tests/{variant}"), "{paths:?}");
        assert!(paths.iter().any(|p| p.as_str() == "/factory-tests/engines"), "{paths:?}");
    }
}

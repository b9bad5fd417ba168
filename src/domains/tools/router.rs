//! Tool Router - builds the rmcp ToolRouter from registry.
//!
//! This module builds the ToolRouter for STDIO/TCP transport from the same
//! ordered entries the registry exposes. Every route shares one client handle.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::registry::ToolRegistry;
use crate::core::klaviyo::ClientHandle;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(handle: Arc<ClientHandle>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRegistry::entries()
        .iter()
        .fold(ToolRouter::new(), |router, entry| {
            router.with_route(entry.route(handle.clone()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::KlaviyoConfig;

    struct TestServer {}

    fn test_handle() -> Arc<ClientHandle> {
        ClientHandle::shared(KlaviyoConfig::default())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_handle());
        let tools = router.list_all();
        assert_eq!(tools.len(), 48);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"get_profiles"));
        assert!(names.contains(&"add_profiles_to_list"));
        assert!(names.contains(&"update_flow_status"));
        assert!(names.contains(&"render_template"));
        assert!(names.contains(&"get_metric_aggregate"));
        assert!(names.contains(&"delete_catalog_item"));
        assert!(names.contains(&"get_deletion_request"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let handle = test_handle();
        let registry = ToolRegistry::new(handle.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(handle);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }

    #[test]
    fn test_router_does_not_build_client() {
        let handle = test_handle();
        let _router: ToolRouter<TestServer> = build_tool_router(handle.clone());
        assert!(!handle.is_initialized());
    }
}

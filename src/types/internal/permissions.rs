//! Canonical permission catalog.
//!
//! Single source of truth for permission names; every authorization check and
//! the seeding routine reference these constants rather than repeating string
//! literals at call sites.

pub const ADS_MANAGE: &str = "ads.manage";
pub const SETTINGS_MANAGE: &str = "settings.manage";
pub const USER_READ: &str = "user.read";
pub const USER_MANAGE: &str = "user.manage";
pub const CATEGORY_MANAGE: &str = "category.manage";
pub const ARTICLE_CREATE: &str = "article.create";
pub const ARTICLE_UPDATE: &str = "article.update";
pub const ARTICLE_DELETE: &str = "article.delete";
pub const ARTICLE_APPROVE: &str = "article.approve";
pub const ARTICLE_READ: &str = "article.read";
pub const ARTICLE_UPDATE_OWN: &str = "article.update_own";
pub const ARTICLE_DELETE_OWN: &str = "article.delete_own";
pub const TAG_MANAGE: &str = "tag.manage";
pub const MEDIA_MANAGE: &str = "media.manage";
pub const MEDIA_UPLOAD: &str = "media.upload";
pub const COMMENT_MANAGE: &str = "comment.manage";
pub const DASHBOARD_VIEW: &str = "dashboard.view";
pub const NAVIGATION_MANAGE: &str = "navigation.manage";
pub const NEWS_TICKER_MANAGE: &str = "news_ticker.manage";

/// Permissions held by the hardcoded administrative principals.
pub fn admin_permissions() -> &'static [&'static str] {
    &[
        ADS_MANAGE,
        SETTINGS_MANAGE,
        USER_READ,
        USER_MANAGE,
        CATEGORY_MANAGE,
        ARTICLE_CREATE,
        ARTICLE_UPDATE,
        ARTICLE_DELETE,
        ARTICLE_APPROVE,
        ARTICLE_READ,
        TAG_MANAGE,
        MEDIA_MANAGE,
        COMMENT_MANAGE,
        DASHBOARD_VIEW,
        NAVIGATION_MANAGE,
    ]
}

/// Permissions bundled into the seeded journalist role.
pub fn journalist_permissions() -> &'static [&'static str] {
    &[
        ARTICLE_CREATE,
        ARTICLE_UPDATE_OWN,
        ARTICLE_DELETE_OWN,
        ARTICLE_READ,
        NEWS_TICKER_MANAGE,
        MEDIA_UPLOAD,
    ]
}

/// A permission definition used when seeding reference data.
#[derive(Debug, Clone, Copy)]
pub struct PermissionDef {
    pub name: &'static str,
    pub resource: &'static str,
    pub action: &'static str,
    pub description: &'static str,
}

/// Every permission known to the system, with its resource+action scope.
pub fn catalog() -> &'static [PermissionDef] {
    &[
        PermissionDef { name: ADS_MANAGE, resource: "ads", action: "manage", description: "Manage advertisements" },
        PermissionDef { name: SETTINGS_MANAGE, resource: "settings", action: "manage", description: "Manage site settings" },
        PermissionDef { name: USER_READ, resource: "user", action: "read", description: "Read user accounts" },
        PermissionDef { name: USER_MANAGE, resource: "user", action: "manage", description: "Manage user accounts" },
        PermissionDef { name: CATEGORY_MANAGE, resource: "category", action: "manage", description: "Manage categories" },
        PermissionDef { name: ARTICLE_CREATE, resource: "article", action: "create", description: "Create articles" },
        PermissionDef { name: ARTICLE_UPDATE, resource: "article", action: "update", description: "Update any article" },
        PermissionDef { name: ARTICLE_DELETE, resource: "article", action: "delete", description: "Delete any draft article" },
        PermissionDef { name: ARTICLE_APPROVE, resource: "article", action: "approve", description: "Approve articles for publication" },
        PermissionDef { name: ARTICLE_READ, resource: "article", action: "read", description: "Read articles" },
        PermissionDef { name: ARTICLE_UPDATE_OWN, resource: "article", action: "update_own", description: "Update own articles" },
        PermissionDef { name: ARTICLE_DELETE_OWN, resource: "article", action: "delete_own", description: "Delete own draft articles" },
        PermissionDef { name: TAG_MANAGE, resource: "tag", action: "manage", description: "Manage tags" },
        PermissionDef { name: MEDIA_MANAGE, resource: "media", action: "manage", description: "Manage the media library" },
        PermissionDef { name: MEDIA_UPLOAD, resource: "media", action: "upload", description: "Upload media" },
        PermissionDef { name: COMMENT_MANAGE, resource: "comment", action: "manage", description: "Moderate comments" },
        PermissionDef { name: DASHBOARD_VIEW, resource: "dashboard", action: "view", description: "View the admin dashboard" },
        PermissionDef { name: NAVIGATION_MANAGE, resource: "navigation", action: "manage", description: "Manage site navigation" },
        PermissionDef { name: NEWS_TICKER_MANAGE, resource: "news_ticker", action: "manage", description: "Manage the news ticker" },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_admin_and_journalist_bundles() {
        let names: Vec<&str> = catalog().iter().map(|p| p.name).collect();
        for perm in admin_permissions() {
            assert!(names.contains(perm), "missing from catalog: {perm}");
        }
        for perm in journalist_permissions() {
            assert!(names.contains(perm), "missing from catalog: {perm}");
        }
    }

    #[test]
    fn test_catalog_names_match_resource_and_action() {
        for def in catalog() {
            assert_eq!(def.name, format!("{}.{}", def.resource, def.action));
        }
    }
}

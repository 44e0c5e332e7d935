// Test utilities shared across handler tests

use actix_web::web;
use std::sync::Arc;
use crate::config::WriteMode;
use crate::db::memory::MemoryDirectoryStore;
use crate::db::DirectoryStore;

/// An in-memory store with roles 1 Admin, 3 Engineer and departments
/// 2 Research, 4 Operations. No users.
pub fn seeded_store() -> Arc<MemoryDirectoryStore> {
    Arc::new(
        MemoryDirectoryStore::new()
            .with_role(1, "Admin")
            .with_role(3, "Engineer")
            .with_department(2, "Research")
            .with_department(4, "Operations"),
    )
}

pub fn app_data(
    store: Arc<MemoryDirectoryStore>,
    mode: WriteMode,
) -> (web::Data<dyn DirectoryStore>, web::Data<WriteMode>) {
    let store: Arc<dyn DirectoryStore> = store;
    (web::Data::from(store), web::Data::new(mode))
}

/// Builds the full API over the given in-memory store.
///
/// ```ignore
/// let app = crate::test_app!(seeded_store());
/// let app = crate::test_app!(seeded_store(), WriteMode::Legacy);
/// ```
#[macro_export]
macro_rules! test_app {
    ($store:expr) => {
        $crate::test_app!($store, $crate::config::WriteMode::Strict)
    };
    ($store:expr, $mode:expr) => {{
        let (store, mode) = $crate::test::utils::app_data($store, $mode);
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(store)
                .app_data(mode)
                .configure($crate::handlers::configure),
        )
        .await
    }};
}

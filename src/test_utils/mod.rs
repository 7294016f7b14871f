#![allow(missing_docs)]

pub(crate) mod http;
pub(crate) mod state;

pub(crate) use http::{assert_content_type, parse_json_body};
pub(crate) use state::{
    FailingAuditLog, category_path, get_test_app_state, insert_test_category,
};

/// Known GenQuery attribute names and select-list labelling.
///
/// The list mirrors the catalog's column table so `iquest attrs` can answer
/// without a connection.

/// Every attribute name accepted in a GenQuery select list or condition.
pub const ATTRIBUTE_NAMES: &[&str] = &[
    // Zones
    "ZONE_ID",
    "ZONE_NAME",
    "ZONE_TYPE",
    "ZONE_CONNECTION",
    "ZONE_COMMENT",
    "ZONE_CREATE_TIME",
    "ZONE_MODIFY_TIME",
    // Users
    "USER_ID",
    "USER_NAME",
    "USER_TYPE",
    "USER_ZONE",
    "USER_INFO",
    "USER_COMMENT",
    "USER_CREATE_TIME",
    "USER_MODIFY_TIME",
    "USER_DN",
    "USER_GROUP_ID",
    "USER_GROUP_NAME",
    // Resources
    "RESC_ID",
    "RESC_NAME",
    "RESC_ZONE_NAME",
    "RESC_TYPE_NAME",
    "RESC_CLASS_NAME",
    "RESC_LOC",
    "RESC_VAULT_PATH",
    "RESC_FREE_SPACE",
    "RESC_FREE_SPACE_TIME",
    "RESC_INFO",
    "RESC_COMMENT",
    "RESC_CREATE_TIME",
    "RESC_MODIFY_TIME",
    "RESC_STATUS",
    "RESC_CHILDREN",
    "RESC_CONTEXT",
    "RESC_PARENT",
    "RESC_PARENT_CONTEXT",
    // Data objects
    "DATA_ID",
    "DATA_COLL_ID",
    "DATA_NAME",
    "DATA_REPL_NUM",
    "DATA_VERSION",
    "DATA_TYPE_NAME",
    "DATA_SIZE",
    "DATA_RESC_NAME",
    "DATA_PATH",
    "DATA_OWNER_NAME",
    "DATA_OWNER_ZONE",
    "DATA_REPL_STATUS",
    "DATA_STATUS",
    "DATA_CHECKSUM",
    "DATA_EXPIRY",
    "DATA_MAP_ID",
    "DATA_COMMENTS",
    "DATA_CREATE_TIME",
    "DATA_MODIFY_TIME",
    "DATA_ACCESS_TYPE",
    "DATA_ACCESS_NAME",
    "DATA_TOKEN_NAMESPACE",
    "DATA_ACCESS_USER_ID",
    "DATA_ACCESS_DATA_ID",
    "DATA_RESC_HIER",
    "DATA_RESC_ID",
    "DATA_MODE",
    // Collections
    "COLL_ID",
    "COLL_NAME",
    "COLL_PARENT_NAME",
    "COLL_OWNER_NAME",
    "COLL_OWNER_ZONE",
    "COLL_MAP_ID",
    "COLL_INHERITANCE",
    "COLL_COMMENTS",
    "COLL_CREATE_TIME",
    "COLL_MODIFY_TIME",
    "COLL_TYPE",
    "COLL_INFO1",
    "COLL_INFO2",
    "COLL_ACCESS_TYPE",
    "COLL_ACCESS_NAME",
    "COLL_TOKEN_NAMESPACE",
    "COLL_ACCESS_USER_ID",
    "COLL_ACCESS_COLL_ID",
    // Metadata
    "META_DATA_ATTR_NAME",
    "META_DATA_ATTR_VALUE",
    "META_DATA_ATTR_UNITS",
    "META_DATA_ATTR_ID",
    "META_DATA_CREATE_TIME",
    "META_DATA_MODIFY_TIME",
    "META_COLL_ATTR_NAME",
    "META_COLL_ATTR_VALUE",
    "META_COLL_ATTR_UNITS",
    "META_COLL_ATTR_ID",
    "META_COLL_CREATE_TIME",
    "META_COLL_MODIFY_TIME",
    "META_NAMESPACE_COLL",
    "META_NAMESPACE_DATA",
    "META_NAMESPACE_RESC",
    "META_NAMESPACE_USER",
    "META_RESC_ATTR_NAME",
    "META_RESC_ATTR_VALUE",
    "META_RESC_ATTR_UNITS",
    "META_RESC_ATTR_ID",
    "META_RESC_CREATE_TIME",
    "META_RESC_MODIFY_TIME",
    "META_USER_ATTR_NAME",
    "META_USER_ATTR_VALUE",
    "META_USER_ATTR_UNITS",
    "META_USER_ATTR_ID",
    "META_USER_CREATE_TIME",
    "META_USER_MODIFY_TIME",
    // Delayed rule execution
    "RULE_EXEC_ID",
    "RULE_EXEC_NAME",
    "RULE_EXEC_REI_FILE_PATH",
    "RULE_EXEC_USER_NAME",
    "RULE_EXEC_ADDRESS",
    "RULE_EXEC_TIME",
    "RULE_EXEC_FREQUENCY",
    "RULE_EXEC_PRIORITY",
    "RULE_EXEC_ESTIMATED_EXE_TIME",
    "RULE_EXEC_NOTIFICATION_ADDR",
    "RULE_EXEC_LAST_EXE_TIME",
    "RULE_EXEC_STATUS",
    "RULE_EXEC_CONTEXT",
    // Tokens
    "TOKEN_NAMESPACE",
    "TOKEN_ID",
    "TOKEN_NAME",
    "TOKEN_VALUE",
    "TOKEN_VALUE2",
    "TOKEN_VALUE3",
    "TOKEN_COMMENT",
    // Audit
    "AUDIT_OBJ_ID",
    "AUDIT_USER_ID",
    "AUDIT_ACTION_ID",
    "AUDIT_COMMENT",
    "AUDIT_CREATE_TIME",
    "AUDIT_MODIFY_TIME",
    // Quotas
    "QUOTA_USER_ID",
    "QUOTA_RESC_ID",
    "QUOTA_LIMIT",
    "QUOTA_OVER",
    "QUOTA_MODIFY_TIME",
    "QUOTA_USAGE",
    "QUOTA_USAGE_MODIFY_TIME",
    "QUOTA_RESC_NAME",
    "QUOTA_USER_NAME",
    "QUOTA_USER_ZONE",
    "QUOTA_USER_TYPE",
    // Specific queries
    "SQL_ID",
    "SQL_ALIAS",
    "SQL_STR",
    "SQL_CREATE_TIME",
    // Tickets
    "TICKET_ID",
    "TICKET_STRING",
    "TICKET_TYPE",
    "TICKET_USER_ID",
    "TICKET_OBJECT_ID",
    "TICKET_OBJECT_TYPE",
    "TICKET_USES_LIMIT",
    "TICKET_USES_COUNT",
    "TICKET_EXPIRY_TS",
    "TICKET_CREATE_TIME",
    "TICKET_MODIFY_TIME",
    "TICKET_WRITE_FILE_COUNT",
    "TICKET_WRITE_FILE_LIMIT",
    "TICKET_WRITE_BYTE_COUNT",
    "TICKET_WRITE_BYTE_LIMIT",
    "TICKET_ALLOWED_HOST_TICKET_ID",
    "TICKET_ALLOWED_HOST",
    "TICKET_ALLOWED_USER_TICKET_ID",
    "TICKET_ALLOWED_USER_NAME",
    "TICKET_ALLOWED_GROUP_TICKET_ID",
    "TICKET_ALLOWED_GROUP_NAME",
    "TICKET_DATA_NAME",
    "TICKET_DATA_COLL_NAME",
    "TICKET_COLL_NAME",
    "TICKET_OWNER_NAME",
    "TICKET_OWNER_ZONE",
];

/// Attribute names of a GenQuery select list, in select order.
///
/// Aggregates and ordering wrappers are unwrapped, so `COUNT(DATA_ID)` labels
/// its column `DATA_ID`. Returns `None` if the text does not start with
/// `SELECT`; the service remains the authority on whether the query is valid.
#[must_use]
pub fn select_labels(query: &str) -> Option<Vec<String>> {
    let upper = query.trim().to_ascii_uppercase();
    let body = upper.strip_prefix("SELECT")?;
    if !body.starts_with(char::is_whitespace) {
        return None;
    }
    let end = find_where(body).unwrap_or(body.len());

    let labels: Vec<String> = body[..end]
        .split(',')
        .map(|item| unwrap_call(item.trim()).to_owned())
        .filter(|item| !item.is_empty())
        .collect();

    if labels.is_empty() { None } else { Some(labels) }
}

/// Byte offset of a standalone `WHERE` keyword.
fn find_where(body: &str) -> Option<usize> {
    body.match_indices("WHERE").map(|(i, _)| i).find(|&i| {
        let before = body[..i].chars().next_back().is_none_or(char::is_whitespace);
        let after = body[i + 5..].chars().next().is_none_or(char::is_whitespace);
        before && after
    })
}

fn unwrap_call(item: &str) -> &str {
    match (item.find('('), item.strip_suffix(')')) {
        (Some(open), Some(inner)) => inner[open + 1..].trim(),
        _ => item,
    }
}

//! Distinguished name helpers
//!
//! Small string-level utilities over DNs. AD treats DNs case-insensitively;
//! callers that use DNs as map keys should lowercase them first.

/// Derive the DNS domain name from a distinguished name.
///
/// Joins the `DC=` components with dots: `CN=Ops,OU=Teams,DC=corp,DC=local`
/// becomes `corp.local`. Returns `None` when the DN carries no domain
/// components at all.
pub fn convert_dn_to_domain(dn: &str) -> Option<String> {
    let parts: Vec<&str> = dn
        .split(',')
        .map(str::trim)
        .filter_map(|component| {
            let (key, value) = component.split_once('=')?;
            if key.eq_ignore_ascii_case("DC") {
                Some(value)
            } else {
                None
            }
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("."))
    }
}

/// Get the leaf (first) RDN of a distinguished name, e.g. `CN=Ops` from
/// `CN=Ops,DC=corp,DC=local`.
pub fn leaf_rdn(dn: &str) -> &str {
    dn.split(',').next().unwrap_or(dn).trim()
}

/// Get the value of the leaf RDN, e.g. `Ops` from `CN=Ops,DC=corp,DC=local`.
///
/// Falls back to the whole leaf component when it carries no `=`.
pub fn leaf_rdn_value(dn: &str) -> &str {
    let rdn = leaf_rdn(dn);
    rdn.split_once('=').map_or(rdn, |(_, value)| value)
}

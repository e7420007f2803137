use camino::Utf8PathBuf;

const FILE_SCHEME: &str = "file://";

/// Turn a user-supplied location into a local path.
///
/// Accepts plain paths and `file://` URIs; any other `scheme://` is rejected.
pub fn resolve_location(location: &str) -> anyhow::Result<Utf8PathBuf> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        anyhow::bail!("empty document location");
    }

    if let Some(rest) = trimmed.strip_prefix(FILE_SCHEME) {
        // file:///abs/path and file://relative/path are both accepted.
        if rest.is_empty() {
            anyhow::bail!("file URI has no path: {trimmed}");
        }
        return Ok(Utf8PathBuf::from(rest));
    }

    if let Some((scheme, _)) = trimmed.split_once("://")
        && !scheme.is_empty()
        && scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c))
    {
        anyhow::bail!("unsupported URI scheme '{scheme}' (only file:// and local paths are supported)");
    }

    Ok(Utf8PathBuf::from(trimmed))
}

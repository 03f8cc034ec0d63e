use texfast::domain::value_objects::Distro;

/// `--version` output: tool version, distribution and compiler banner.
pub fn render_version(tool_version: &str, distro: Distro, banner: Option<&str>) -> String {
    let mut out = format!("texfast {tool_version}\n");
    match banner {
        Some(banner) => {
            out.push_str(&format!("TeX distribution: {distro}\n"));
            out.push_str(&format!("Compiler: {banner}\n"));
        }
        None => out.push_str("Compiler: not found\n"),
    }
    out
}

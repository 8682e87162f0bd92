//! Boot splash with the server's reachable addresses.

use chrono::Local;
use epaper::{DisplayProfile, Orientation};
use layout_engine::{Canvas, TextRenderer, EDGE_MARGIN_PX};

use crate::app::SharedState;

/// Compose the splash frame for `profile` in landscape orientation.
pub fn splash_canvas(
    profile: DisplayProfile,
    text: &dyn TextRenderer,
    addrs: &[String],
    port: u16,
) -> Canvas {
    let geometry = profile.geometry(Orientation::Landscape);
    let mut canvas = Canvas::new(geometry.width, geometry.height);

    let size = profile.default_font_px;
    let line_h = text.line_height(size).unwrap_or(size + 4) as i32;

    let mut lines = vec![crate::APP_NAME.to_owned()];
    for addr in addrs {
        lines.push(format!("http://{addr}:{port}/"));
    }
    lines.push(format!(
        "{}x{} type {}",
        profile.width_px, profile.height_px, profile.type_id
    ));
    lines.push(Local::now().format("%Y-%m-%d %H:%M").to_string());

    let mut y = EDGE_MARGIN_PX as i32;
    for line in &lines {
        text.draw(canvas.image_mut(), EDGE_MARGIN_PX as i32, y, size, line);
        y += line_h;
    }

    canvas.rotated(geometry.rotation)
}

/// Non-loopback IPv4 addresses of this host, as dotted strings.
pub fn local_ipv4_addrs() -> Vec<String> {
    match if_addrs::get_if_addrs() {
        Ok(ifaces) => ifaces
            .into_iter()
            .filter(|iface| !iface.is_loopback())
            .filter_map(|iface| match iface.addr {
                if_addrs::IfAddr::V4(v4) => Some(v4.ip.to_string()),
                _ => None,
            })
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to enumerate network interfaces: {e}");
            Vec::new()
        }
    }
}

/// Render and present the splash frame. Failures are logged, not fatal.
pub async fn show_splash(state: &SharedState) {
    let addrs = local_ipv4_addrs();
    let canvas = splash_canvas(
        state.profile(),
        state.engine().text(),
        &addrs,
        state.server_port(),
    );
    let timeout = state.config().transfer_timeout_secs;
    if let Err(e) = state.display().present(canvas.into_image(), timeout).await {
        tracing::warn!("Splash screen failed: {e}");
    }
}

//! Static service catalog for `list services`.

/// Service names an instance can enable. The list is fixed at build time;
/// service semantics live in the sandbox layer, not here.
pub const SERVICE_NAMES: &[&str] = &[
    "dbus",
    "direct_rendering",
    "home_share",
    "ibus",
    "joystick",
    "network",
    "notifications",
    "pulse_audio",
    "wayland",
    "x11",
];

pub const WIDGET_FRAMES: [&str; 10] = [
    "<^--------->",
    "<-^-------->",
    "<--^------->",
    "<---^------>",
    "<----^----->",
    "<-----^---->",
    "<------^--->",
    "<-------^-->",
    "<--------^->",
    "<---------^>",
];

/// Odometer-style animation of `line_no`.
///
/// Each wheel is one base-10 digit of the line index, lowest first. The
/// number of extra wheels follows the order of magnitude of the target rate
/// rather than of the line index, so faster replays show more moving parts.
pub fn render_widget(line_no: u64, lines_per_second: f64) -> String {
    let base = WIDGET_FRAMES.len() as u64;
    let extra_wheels = wheel_count(lines_per_second);

    let mut out = String::with_capacity(WIDGET_FRAMES[0].len() * (extra_wheels + 1) + 1);
    let mut n = line_no;
    out.push_str(WIDGET_FRAMES[(n % base) as usize]);
    for _ in 0..extra_wheels {
        n /= base;
        out.push_str(WIDGET_FRAMES[(n % base) as usize]);
    }
    out.push('\r');
    out
}

fn wheel_count(lines_per_second: f64) -> usize {
    let digits = lines_per_second.log10();
    if digits.is_finite() && digits > 0.0 {
        digits as usize
    } else {
        0
    }
}

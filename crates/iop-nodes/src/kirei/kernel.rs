//! Neighborhood filters.
//!
//! These read a window around each output pixel through the upstream
//! [`iop_core::PixelSource`], clamped at the frame edge. Each checks the
//! abort token once on entry; an aborted call leaves the output untouched.
//!
//! Kernel tables are indexed `[px + 1][py + 1]` with `px` the horizontal
//! and `py` the vertical tap offset.

use super::KireiParams;
use iop_core::{Channel, EvalContext, Row, RowSpan};

/// Box average over a `(2 * blur_size + 1)²` window.
pub(super) fn blur(params: &KireiParams, ctx: &EvalContext<'_>, span: RowSpan, out: &mut Row) {
    if ctx.abort.is_aborted() {
        return;
    }
    let size = params.blur_size;
    let (rout, gout, bout) = out.writable_rgb_span(span.x, span.r);

    for (i, cx) in (span.x..span.r).enumerate() {
        let mut red = 0.0;
        let mut green = 0.0;
        let mut blue = 0.0;
        let mut count = 0;
        for px in -size..=size {
            for py in -size..=size {
                red += ctx.source.sample(Channel::RED, cx + px, span.y + py);
                green += ctx.source.sample(Channel::GREEN, cx + px, span.y + py);
                blue += ctx.source.sample(Channel::BLUE, cx + px, span.y + py);
                count += 1;
            }
        }
        if count != 0 {
            red /= count as f32;
            green /= count as f32;
            blue /= count as f32;
        }
        rout[i] = red;
        gout[i] = green;
        bout[i] = blue;
    }
}

fn convolve_3x3(
    ctx: &EvalContext<'_>,
    kernel: &[[f32; 3]; 3],
    cx: i32,
    cy: i32,
) -> (f32, f32, f32) {
    let mut red = 0.0;
    let mut green = 0.0;
    let mut blue = 0.0;
    for px in -1..=1i32 {
        for py in -1..=1i32 {
            let weight = kernel[(px + 1) as usize][(py + 1) as usize];
            red += weight * ctx.source.sample(Channel::RED, cx + px, cy + py);
            green += weight * ctx.source.sample(Channel::GREEN, cx + px, cy + py);
            blue += weight * ctx.source.sample(Channel::BLUE, cx + px, cy + py);
        }
    }
    (red, green, blue)
}

/// High-boost sharpening: subtract a strength-scaled Laplacian response
/// from the center pixel.
pub(super) fn sharpen(params: &KireiParams, ctx: &EvalContext<'_>, span: RowSpan, out: &mut Row) {
    if ctx.abort.is_aborted() {
        return;
    }
    const KERNEL: [[f32; 3]; 3] = [
        [1.0, 1.0, 1.0],
        [1.0, -8.0, 1.0],
        [1.0, 1.0, 1.0],
    ];
    let strength = params.sharpen_strength;
    let (rout, gout, bout) = out.writable_rgb_span(span.x, span.r);

    for (i, cx) in (span.x..span.r).enumerate() {
        let (red, green, blue) = convolve_3x3(ctx, &KERNEL, cx, span.y);
        rout[i] = ctx.source.sample(Channel::RED, cx, span.y) - red * strength;
        gout[i] = ctx.source.sample(Channel::GREEN, cx, span.y) - green * strength;
        bout[i] = ctx.source.sample(Channel::BLUE, cx, span.y) - blue * strength;
    }
}

/// Directional edge kernel, emitted raw.
pub(super) fn edge_enhance(
    params: &KireiParams,
    ctx: &EvalContext<'_>,
    span: RowSpan,
    out: &mut Row,
) {
    if ctx.abort.is_aborted() {
        return;
    }
    let strength = params.edge_enhance_strength;
    let kernel = [
        [0.0, 1.0, 0.0],
        [-strength, strength, 0.0],
        [0.0, 0.0, 0.0],
    ];
    let (rout, gout, bout) = out.writable_rgb_span(span.x, span.r);

    for (i, cx) in (span.x..span.r).enumerate() {
        let (red, green, blue) = convolve_3x3(ctx, &kernel, cx, span.y);
        rout[i] = red;
        gout[i] = green;
        bout[i] = blue;
    }
}

/// Raw 4-neighbor Laplacian convolution.
pub(super) fn playground(ctx: &EvalContext<'_>, span: RowSpan, out: &mut Row) {
    if ctx.abort.is_aborted() {
        return;
    }
    const KERNEL: [[f32; 3]; 3] = [
        [0.0, 1.0, 0.0],
        [1.0, -4.0, 1.0],
        [0.0, 1.0, 0.0],
    ];
    let (rout, gout, bout) = out.writable_rgb_span(span.x, span.r);

    for (i, cx) in (span.x..span.r).enumerate() {
        let (red, green, blue) = convolve_3x3(ctx, &KERNEL, cx, span.y);
        rout[i] = red;
        gout[i] = green;
        bout[i] = blue;
    }
}

//! Host-side render drivers.
//!
//! These run a negotiated engine over a whole [`Frame`]: validate, request
//! the padded input region, then evaluate row by row. With the default
//! `parallel` feature rows are produced on the Rayon pool and stored in
//! order afterwards; row production is read-only over the source, so
//! disjoint rows evaluate concurrently.

use crate::error::NodeResult;
use iop_core::{
    AbortToken, ChannelSet, DrawEngine, EvalContext, Frame, Negotiation, PixelSource, Row,
    RowEngine, RowSpan,
};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

fn produce_row(
    engine: &dyn RowEngine,
    negotiation: &Negotiation,
    src: &Frame,
    abort: &AbortToken,
    y: i32,
) -> iop_core::Result<Row> {
    let bounds = src.bounds();
    let ctx = EvalContext { frame: bounds, source: src, abort };
    let in_region = engine.request(bounds);

    let mut in_row = Row::new(in_region.x, in_region.r, negotiation.in_channels);
    src.load_row(y, negotiation.in_channels, &mut in_row);

    let mut out = Row::new(bounds.x, bounds.r, negotiation.out_channels);
    let span = RowSpan::new(y, bounds.x, bounds.r);
    engine.pixel_engine(&ctx, &in_row, span, negotiation.out_channels, &mut out)?;
    Ok(out)
}

/// Runs a row engine over a frame and returns the result.
///
/// Channels the source carries but the engine does not produce are copied
/// through unchanged. A disabled negotiation short-circuits to a plain copy
/// of the source. An abort mid-pass returns the partially written frame.
///
/// # Errors
///
/// Propagates validation and evaluation errors from the engine.
///
/// # Example
///
/// ```rust
/// use iop_core::{AbortToken, Channel, ChannelSet, Frame};
/// use iop_nodes::kirei::{FilterMode, Kirei, KireiParams};
/// use iop_nodes::render::render_rows;
///
/// let mut src = Frame::new(4, 4, ChannelSet::RGB).unwrap();
/// src.fill(Channel::RED, 0.25);
/// let invert = Kirei::new(KireiParams {
///     mode: FilterMode::Invert,
///     ..KireiParams::default()
/// })
/// .unwrap();
///
/// let out = render_rows(&invert, &src, &AbortToken::new()).unwrap();
/// assert_eq!(out.get(Channel::RED, 0, 0), 0.75);
/// ```
pub fn render_rows(
    engine: &dyn RowEngine,
    src: &Frame,
    abort: &AbortToken,
) -> NodeResult<Frame> {
    let negotiation = engine.validate(src.channels())?;
    if negotiation.is_disabled() {
        debug!("engine disabled for this cycle, passing source through");
        return Ok(src.clone());
    }
    debug!(
        in_channels = %negotiation.in_channels,
        out_channels = %negotiation.out_channels,
        pad = negotiation.pad,
        "render pass"
    );

    let mut dst = Frame::new(
        src.width(),
        src.height(),
        negotiation.out_channels.union(src.channels()),
    )?;
    for ch in src.channels().iter() {
        if !negotiation.out_channels.contains(ch) {
            for y in 0..src.height() {
                dst.row_mut(ch, y).copy_from_slice(src.row(ch, y));
            }
        }
    }

    let rows = evaluate_rows(engine, &negotiation, src, abort)?;
    for (y, row) in rows.into_iter().enumerate() {
        if abort.is_aborted() {
            break;
        }
        dst.store_row(y as i32, &row, negotiation.out_channels);
    }
    Ok(dst)
}

#[cfg(feature = "parallel")]
fn evaluate_rows(
    engine: &dyn RowEngine,
    negotiation: &Negotiation,
    src: &Frame,
    abort: &AbortToken,
) -> iop_core::Result<Vec<Row>> {
    (0..src.height())
        .into_par_iter()
        .map(|y| produce_row(engine, negotiation, src, abort, y))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_rows(
    engine: &dyn RowEngine,
    negotiation: &Negotiation,
    src: &Frame,
    abort: &AbortToken,
) -> iop_core::Result<Vec<Row>> {
    (0..src.height())
        .map(|y| produce_row(engine, negotiation, src, abort, y))
        .collect()
}

/// Runs a generator over a fresh frame, writing its scalar output into
/// every requested channel.
///
/// # Errors
///
/// Propagates frame construction and fill errors.
pub fn draw_frame(
    engine: &dyn DrawEngine,
    width: i32,
    height: i32,
    channels: ChannelSet,
) -> NodeResult<Frame> {
    let mut dst = Frame::new(width, height, channels)?;
    debug!(width, height, channels = %channels, "draw pass");

    let rows = fill_rows(engine, width, height)?;
    for (y, buffer) in rows.iter().enumerate() {
        for ch in channels.iter() {
            dst.row_mut(ch, y as i32).copy_from_slice(buffer);
        }
    }
    Ok(dst)
}

#[cfg(feature = "parallel")]
fn fill_rows(engine: &dyn DrawEngine, width: i32, height: i32) -> iop_core::Result<Vec<Vec<f32>>> {
    (0..height)
        .into_par_iter()
        .map(|y| {
            let mut buffer = vec![0.0f32; width as usize];
            engine.fill_row(y, 0, width, &mut buffer)?;
            Ok(buffer)
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn fill_rows(engine: &dyn DrawEngine, width: i32, height: i32) -> iop_core::Result<Vec<Vec<f32>>> {
    (0..height)
        .map(|y| {
            let mut buffer = vec![0.0f32; width as usize];
            engine.fill_row(y, 0, width, &mut buffer)?;
            Ok(buffer)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kirei::{FilterMode, Kirei, KireiParams};
    use crate::pattern::{Gradient, GradientParams};
    use approx::assert_relative_eq;
    use iop_core::Channel;

    fn ramp_frame() -> Frame {
        let mut frame = Frame::new(8, 8, ChannelSet::RGBA).unwrap();
        for ch in ChannelSet::RGB.iter() {
            frame.fill_with(ch, |x, y| (x + y) as f32 * 0.05);
        }
        frame.fill(Channel::ALPHA, 1.0);
        frame
    }

    #[test]
    fn test_render_invert_full_frame() {
        let src = ramp_frame();
        let invert = Kirei::new(KireiParams {
            mode: FilterMode::Invert,
            ..KireiParams::default()
        })
        .unwrap();
        let out = render_rows(&invert, &src, &AbortToken::new()).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                assert_relative_eq!(
                    out.get(Channel::RED, x, y),
                    1.0 - src.get(Channel::RED, x, y)
                );
            }
        }
        // Alpha passes through the engine untouched
        assert_eq!(out.get(Channel::ALPHA, 3, 3), 1.0);
    }

    #[test]
    fn test_render_blur_matches_direct_sampling() {
        let src = ramp_frame();
        let blur = Kirei::new(KireiParams {
            mode: FilterMode::Blur,
            blur_size: 1,
            ..KireiParams::default()
        })
        .unwrap();
        let out = render_rows(&blur, &src, &AbortToken::new()).unwrap();

        let mut expected = 0.0;
        for px in -1..=1 {
            for py in -1..=1 {
                expected += src.sample(Channel::GREEN, 4 + px, 4 + py);
            }
        }
        assert_relative_eq!(out.get(Channel::GREEN, 4, 4), expected / 9.0, max_relative = 1e-5);
    }

    #[test]
    fn test_aborted_render_keeps_source_pixels_out_of_engine() {
        let src = ramp_frame();
        let blur = Kirei::new(KireiParams {
            mode: FilterMode::Blur,
            ..KireiParams::default()
        })
        .unwrap();
        let abort = AbortToken::new();
        abort.abort();
        let out = render_rows(&blur, &src, &abort).unwrap();
        // Engine rows were skipped; the colour planes stay zeroed
        assert_eq!(out.get(Channel::RED, 4, 4), 0.0);
    }

    #[test]
    fn test_draw_gradient_center() {
        let gradient = Gradient::new(GradientParams {
            position: (4.0, 4.0),
            radius: 4.0,
            ..GradientParams::default()
        })
        .unwrap();
        let mask = draw_frame(&gradient, 9, 9, Channel::ALPHA.into()).unwrap();
        assert_relative_eq!(mask.get(Channel::ALPHA, 4, 4), 0.0);
        assert_relative_eq!(mask.get(Channel::ALPHA, 0, 4), 1.0);
        assert_relative_eq!(mask.get(Channel::ALPHA, 4, 8), 1.0);
    }
}

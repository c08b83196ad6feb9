//! Integration tests for the iop crates.
//!
//! End-to-end scenarios that drive the engines through the full-frame
//! render drivers and chain crates together.

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use iop_core::{AbortToken, Channel, ChannelSet, Frame, PixelSource};
    use iop_nodes::bumpy::{Bumpy, BumpyParams};
    use iop_nodes::fractal::{
        Julia, JuliaParams, Mandelbrot, MandelbrotParams, Shading,
    };
    use iop_nodes::kirei::{FilterMode, Kirei, KireiParams};
    use iop_nodes::pattern::{Check, CheckParams, Gradient, GradientParams};
    use iop_nodes::render::{draw_frame, render_rows};

    fn kirei(mode: FilterMode) -> Kirei {
        Kirei::new(KireiParams { mode, ..KireiParams::default() }).unwrap()
    }

    fn ramp_frame(width: i32, height: i32) -> Frame {
        let mut frame = Frame::new(width, height, ChannelSet::RGBA).unwrap();
        frame.fill_with(Channel::RED, |x, _| x as f32 / width as f32);
        frame.fill_with(Channel::GREEN, |_, y| y as f32 / height as f32);
        frame.fill_with(Channel::BLUE, |x, y| ((x + y) % 2) as f32);
        frame.fill(Channel::ALPHA, 1.0);
        frame
    }

    /// Render a full Mandelbrot frame and probe known regions of the plane.
    #[test]
    fn test_mandelbrot_frame_interior_and_exterior() {
        let mandelbrot = Mandelbrot::new(MandelbrotParams {
            width: 100.0,
            height: 100.0,
            ..MandelbrotParams::default()
        })
        .unwrap();
        let frame = draw_frame(&mandelbrot, 100, 100, Channel::ALPHA.into()).unwrap();

        // The frame center maps near c = -0.5, inside the main cardioid
        assert_eq!(frame.get(Channel::ALPHA, 50, 50), 0.0);
        // The corner lies far outside the set and escapes quickly
        assert!(frame.get(Channel::ALPHA, 0, 0) > 0.0);
    }

    /// Julia with c = 0 degenerates to z := z²; the unit disk is the filled
    /// set, so the frame center stays inside and the corners escape.
    #[test]
    fn test_julia_unit_disk() {
        let julia = Julia::new(JuliaParams {
            width: 100.0,
            height: 100.0,
            c_real: 0.0,
            c_imag: 0.0,
            shading: Shading::Smooth,
            ..JuliaParams::default()
        })
        .unwrap();
        let frame = draw_frame(&julia, 100, 100, Channel::ALPHA.into()).unwrap();
        assert_eq!(frame.get(Channel::ALPHA, 50, 50), 0.0);
        assert!(frame.get(Channel::ALPHA, 0, 0) > 0.0);
    }

    /// A generated checkerboard drives the normal-map engine: unit-length
    /// normals everywhere, straight up inside a flat cell.
    #[test]
    fn test_check_pattern_feeds_normal_map() {
        let check = Check::new(CheckParams {
            scale_x: 16.0,
            scale_y: 16.0,
            ..CheckParams::default()
        })
        .unwrap();
        let height_map = draw_frame(&check, 64, 64, Channel::RED.into()).unwrap();

        let bumpy = Bumpy::new(BumpyParams::default());
        let normals = render_rows(&bumpy, &height_map, &AbortToken::new()).unwrap();

        for y in 1..63 {
            for x in 1..63 {
                let nx = normals.get(Channel::RED, x, y);
                let ny = normals.get(Channel::GREEN, x, y);
                let nz = normals.get(Channel::BLUE, x, y);
                let len = (nx * nx + ny * ny + nz * nz).sqrt();
                assert_relative_eq!(len, 1.0, max_relative = 1e-4);
            }
        }
        // Cell interior is flat
        assert_relative_eq!(normals.get(Channel::BLUE, 8, 8), 1.0);
        // Cell boundaries carry the gradient response
        assert!(normals.get(Channel::RED, 16, 8).abs() > 0.1);
    }

    /// Two colour passes chained through frames compose pointwise.
    #[test]
    fn test_sepia_then_invert_composes() {
        let src = ramp_frame(16, 16);
        let abort = AbortToken::new();
        let toned = render_rows(&kirei(FilterMode::Sepia), &src, &abort).unwrap();
        let final_frame = render_rows(&kirei(FilterMode::Invert), &toned, &abort).unwrap();

        for y in 0..16 {
            for x in 0..16 {
                for ch in ChannelSet::RGB.iter() {
                    assert_relative_eq!(
                        final_frame.get(ch, x, y),
                        1.0 - toned.get(ch, x, y)
                    );
                }
            }
        }
        // Alpha survives both passes untouched
        assert_eq!(final_frame.get(Channel::ALPHA, 7, 7), 1.0);
    }

    /// The blur pad negotiation round-trips through the driver: a zero
    /// window is the identity over the whole frame.
    #[test]
    fn test_blur_size_zero_identity_full_frame() {
        let src = ramp_frame(12, 10);
        let blur = Kirei::new(KireiParams {
            mode: FilterMode::Blur,
            blur_size: 0,
            ..KireiParams::default()
        })
        .unwrap();
        let out = render_rows(&blur, &src, &AbortToken::new()).unwrap();
        for ch in ChannelSet::RGB.iter() {
            for y in 0..10 {
                assert_eq!(out.row(ch, y), src.row(ch, y));
            }
        }
    }

    /// Blurring a constant frame changes nothing even at the clamped edges.
    #[test]
    fn test_blur_constant_frame_invariant() {
        let mut src = Frame::new(10, 10, ChannelSet::RGB).unwrap();
        for ch in ChannelSet::RGB.iter() {
            src.fill(ch, 0.42);
        }
        let out = render_rows(&kirei(FilterMode::Blur), &src, &AbortToken::new()).unwrap();
        for y in 0..10 {
            for x in 0..10 {
                assert_relative_eq!(out.get(Channel::GREEN, x, y), 0.42, max_relative = 1e-5);
            }
        }
    }

    /// A gradient mask thresholded through the pipeline yields a filled
    /// disk: zero near the center, one far away.
    #[test]
    fn test_gradient_mask_through_threshold() {
        let gradient = Gradient::new(GradientParams {
            position: (16.0, 16.0),
            radius: 16.0,
            ..GradientParams::default()
        })
        .unwrap();
        let mut mask = draw_frame(&gradient, 33, 33, ChannelSet::RGB).unwrap();
        mask.fill(Channel::ALPHA, 1.0);

        let out = render_rows(&kirei(FilterMode::Threshold), &mask, &AbortToken::new()).unwrap();
        assert_eq!(out.get(Channel::RED, 16, 16), 0.0);
        assert_eq!(out.get(Channel::RED, 0, 16), 1.0);
        assert_eq!(out.get(Channel::ALPHA, 16, 16), 1.0);
    }

    /// A missing source channel disables the engine and the driver passes
    /// the frame through untouched.
    #[test]
    fn test_disabled_engine_passes_frame_through() {
        let mut src = Frame::new(8, 8, ChannelSet::RGB).unwrap();
        src.fill(Channel::GREEN, 0.3);

        let bumpy = Bumpy::new(BumpyParams {
            source_channel: Channel::ALPHA,
            ..BumpyParams::default()
        });
        let out = render_rows(&bumpy, &src, &AbortToken::new()).unwrap();
        assert_eq!(out.get(Channel::GREEN, 4, 4), 0.3);
        assert_eq!(out.channels(), src.channels());
    }

    /// An abort raised before the pass leaves engine output unwritten.
    #[test]
    fn test_abort_short_circuits_render() {
        let src = ramp_frame(8, 8);
        let abort = AbortToken::new();
        abort.abort();
        let out = render_rows(&kirei(FilterMode::Invert), &src, &abort).unwrap();
        assert_eq!(out.get(Channel::RED, 4, 4), 0.0);
    }
}

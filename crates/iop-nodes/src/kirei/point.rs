//! Point filters: every output pixel depends only on the matching input
//! pixel (and, for the vignette, its coordinates).

use super::{KireiParams, blackbody, luminance};
use iop_core::{Region, Row, RowSpan};
use iop_math::{lerp, smoothstep};

pub(super) fn passthrough(in_row: &Row, span: RowSpan, out: &mut Row) {
    let (rin, gin, bin) = in_row.rgb_span(span.x, span.r);
    let (rout, gout, bout) = out.writable_rgb_span(span.x, span.r);
    rout.copy_from_slice(rin);
    gout.copy_from_slice(gin);
    bout.copy_from_slice(bin);
}

pub(super) fn vignette(
    params: &KireiParams,
    frame: Region,
    in_row: &Row,
    span: RowSpan,
    out: &mut Row,
) {
    let width = frame.width() as f32;
    let height = frame.height() as f32;
    let radius = params.vignette_radius;
    let softness = params.vignette_softness;

    let (rin, gin, bin) = in_row.rgb_span(span.x, span.r);
    let (rout, gout, bout) = out.writable_rgb_span(span.x, span.r);

    let ny = span.y as f32 / height - 0.5;
    for i in 0..rin.len() {
        let nx = (span.x + i as i32) as f32 / width - 0.5;
        let distance = (nx * nx + ny * ny).sqrt();
        let falloff = smoothstep(radius, radius - softness, distance);

        // Half-strength blend between the original and the darkened colour
        rout[i] = lerp(rin[i], rin[i] * falloff, 0.5);
        gout[i] = lerp(gin[i], gin[i] * falloff, 0.5);
        bout[i] = lerp(bin[i], bin[i] * falloff, 0.5);
    }
}

pub(super) fn invert(in_row: &Row, span: RowSpan, out: &mut Row) {
    let (rin, gin, bin) = in_row.rgb_span(span.x, span.r);
    let (rout, gout, bout) = out.writable_rgb_span(span.x, span.r);
    for i in 0..rin.len() {
        rout[i] = 1.0 - rin[i];
        gout[i] = 1.0 - gin[i];
        bout[i] = 1.0 - bin[i];
    }
}

pub(super) fn threshold(params: &KireiParams, in_row: &Row, span: RowSpan, out: &mut Row) {
    let (rin, gin, bin) = in_row.rgb_span(span.x, span.r);
    let (rout, gout, bout) = out.writable_rgb_span(span.x, span.r);
    for i in 0..rin.len() {
        let value = if luminance(rin[i], gin[i], bin[i]) < params.threshold_limit {
            0.0
        } else {
            1.0
        };
        rout[i] = value;
        gout[i] = value;
        bout[i] = value;
    }
}

pub(super) fn sepia(in_row: &Row, span: RowSpan, out: &mut Row) {
    let (rin, gin, bin) = in_row.rgb_span(span.x, span.r);
    let (rout, gout, bout) = out.writable_rgb_span(span.x, span.r);
    for i in 0..rin.len() {
        let (r, g, b) = (rin[i], gin[i], bin[i]);
        // Clamped from above only; dark tones keep their depth
        rout[i] = (r * 0.393 + g * 0.769 + b * 0.189).min(1.0);
        gout[i] = (r * 0.349 + g * 0.686 + b * 0.168).min(1.0);
        bout[i] = (r * 0.272 + g * 0.534 + b * 0.131).min(1.0);
    }
}

pub(super) fn temperature(params: &KireiParams, in_row: &Row, span: RowSpan, out: &mut Row) {
    let [fr, fg, fb] = blackbody::correction_factors(params.temperature);
    let (rin, gin, bin) = in_row.rgb_span(span.x, span.r);
    let (rout, gout, bout) = out.writable_rgb_span(span.x, span.r);
    for i in 0..rin.len() {
        rout[i] = rin[i] * fr;
        gout[i] = gin[i] * fg;
        bout[i] = bin[i] * fb;
    }
}

pub(super) fn mix_channels(params: &KireiParams, in_row: &Row, span: RowSpan, out: &mut Row) {
    let (rin, gin, bin) = in_row.rgb_span(span.x, span.r);
    let (rout, gout, bout) = out.writable_rgb_span(span.x, span.r);
    for i in 0..rin.len() {
        let (r, g, b) = (rin[i], gin[i], bin[i]);
        let new_r = params.mix_bg_into_red
            * (params.mix_blue_green * g + (1.0 - params.mix_blue_green) * b)
            + (1.0 - params.mix_bg_into_red) * r;
        let new_g = params.mix_rb_into_green
            * (params.mix_red_blue * b + (1.0 - params.mix_red_blue) * r)
            + (1.0 - params.mix_rb_into_green) * g;
        let new_b = params.mix_gr_into_blue
            * (params.mix_green_red * r + (1.0 - params.mix_green_red) * g)
            + (1.0 - params.mix_gr_into_blue) * b;
        rout[i] = new_r.clamp(0.0, 1.0);
        gout[i] = new_g.clamp(0.0, 1.0);
        bout[i] = new_b.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{rgb_frame, run_row};
    use super::super::{FilterMode, Kirei, KireiParams};
    use approx::assert_relative_eq;
    use iop_core::{Channel, ChannelSet, Frame};

    fn kirei(mode: FilterMode) -> Kirei {
        Kirei::new(KireiParams { mode, ..KireiParams::default() }).unwrap()
    }

    #[test]
    fn test_passthrough_is_identity() {
        let frame = rgb_frame(8, 4);
        let out = run_row(&kirei(FilterMode::Passthrough), &frame, 2, ChannelSet::RGBA);
        for ch in ChannelSet::RGBA.iter() {
            assert_eq!(out.channel(ch), frame.row(ch, 2));
        }
    }

    #[test]
    fn test_invert_is_involution() {
        // Eighths survive 1 - x without rounding, so inverting twice must
        // give the input back bit for bit
        let mut frame = Frame::new(8, 4, ChannelSet::RGB).unwrap();
        for (i, ch) in ChannelSet::RGB.iter().enumerate() {
            frame.fill_with(ch, move |x, y| ((x + y + i as i32) % 9) as f32 * 0.125);
        }
        let node = kirei(FilterMode::Invert);
        let once = run_row(&node, &frame, 1, ChannelSet::RGB);

        let mut inverted = Frame::new(8, 4, ChannelSet::RGB).unwrap();
        inverted.store_row(1, &once, ChannelSet::RGB);
        let twice = run_row(&node, &inverted, 1, ChannelSet::RGB);

        for ch in ChannelSet::RGB.iter() {
            assert_eq!(twice.channel(ch), frame.row(ch, 1));
        }
    }

    #[test]
    fn test_threshold_bimodal() {
        let frame = rgb_frame(8, 4);
        let out = run_row(&kirei(FilterMode::Threshold), &frame, 3, ChannelSet::RGB);
        for ch in ChannelSet::RGB.iter() {
            for &v in out.channel(ch) {
                assert!(v == 0.0 || v == 1.0);
            }
        }
    }

    #[test]
    fn test_threshold_uses_luminance_weights() {
        let mut frame = Frame::new(2, 1, ChannelSet::RGB).unwrap();
        // Pure green (0.59) passes a 0.5 cut; pure blue (0.11) does not
        frame.set(Channel::GREEN, 0, 0, 1.0);
        frame.set(Channel::BLUE, 1, 0, 1.0);
        let out = run_row(&kirei(FilterMode::Threshold), &frame, 0, ChannelSet::RGB);
        assert_eq!(out.channel(Channel::RED), &[1.0, 0.0]);
    }

    #[test]
    fn test_sepia_pure_red() {
        let mut frame = Frame::new(3, 1, ChannelSet::RGB).unwrap();
        frame.fill(Channel::RED, 1.0);
        let out = run_row(&kirei(FilterMode::Sepia), &frame, 0, ChannelSet::RGB);
        assert_relative_eq!(out.channel(Channel::RED)[0], 0.393, max_relative = 1e-6);
        assert_relative_eq!(out.channel(Channel::GREEN)[0], 0.349, max_relative = 1e-6);
        assert_relative_eq!(out.channel(Channel::BLUE)[0], 0.272, max_relative = 1e-6);
    }

    #[test]
    fn test_sepia_clamps_above_only() {
        let mut frame = Frame::new(1, 1, ChannelSet::RGB).unwrap();
        frame.fill(Channel::RED, 2.0);
        frame.fill(Channel::GREEN, 2.0);
        frame.fill(Channel::BLUE, 2.0);
        let out = run_row(&kirei(FilterMode::Sepia), &frame, 0, ChannelSet::RGB);
        for ch in ChannelSet::RGB.iter() {
            assert_eq!(out.channel(ch)[0], 1.0);
        }
    }

    #[test]
    fn test_vignette_darkens_corners_not_center() {
        let mut frame = Frame::new(9, 9, ChannelSet::RGB).unwrap();
        frame.fill(Channel::RED, 1.0);
        frame.fill(Channel::GREEN, 1.0);
        frame.fill(Channel::BLUE, 1.0);
        let node = kirei(FilterMode::Vignette);

        let center = run_row(&node, &frame, 4, ChannelSet::RGB);
        let edge = run_row(&node, &frame, 0, ChannelSet::RGB);

        // Frame center keeps full brightness; the corner is blended darker
        assert_relative_eq!(center.channel(Channel::RED)[4], 1.0);
        assert!(edge.channel(Channel::RED)[0] < 1.0);
        // The blend is half strength, so even a fully vignetted pixel
        // keeps half its value
        assert!(edge.channel(Channel::RED)[0] >= 0.5);
    }

    #[test]
    fn test_temperature_reference_point_is_nearly_neutral() {
        let frame = rgb_frame(4, 2);
        let node = kirei(FilterMode::Temperature);
        // 6650 K sits next to the table's white point; factors stay near 1
        let out = run_row(&node, &frame, 0, ChannelSet::RGB);
        for ch in ChannelSet::RGB.iter() {
            for (o, i) in out.channel(ch).iter().zip(frame.row(ch, 0)) {
                assert_relative_eq!(o, i, epsilon = 0.1);
            }
        }
    }

    #[test]
    fn test_mixer_identity_at_zero() {
        let frame = rgb_frame(8, 4);
        let out = run_row(&kirei(FilterMode::ChannelMixer), &frame, 2, ChannelSet::RGB);
        for ch in ChannelSet::RGB.iter() {
            assert_eq!(out.channel(ch), frame.row(ch, 2));
        }
    }

    #[test]
    fn test_mixer_full_swap() {
        let mut frame = Frame::new(1, 1, ChannelSet::RGB).unwrap();
        frame.set(Channel::RED, 0, 0, 0.2);
        frame.set(Channel::GREEN, 0, 0, 0.4);
        frame.set(Channel::BLUE, 0, 0, 0.9);
        // Red becomes entirely the green side of the B/G blend
        let node = Kirei::new(KireiParams {
            mode: FilterMode::ChannelMixer,
            mix_blue_green: 1.0,
            mix_bg_into_red: 1.0,
            ..KireiParams::default()
        })
        .unwrap();
        let out = run_row(&node, &frame, 0, ChannelSet::RGB);
        assert_relative_eq!(out.channel(Channel::RED)[0], 0.4);
        assert_relative_eq!(out.channel(Channel::GREEN)[0], 0.4);
        assert_relative_eq!(out.channel(Channel::BLUE)[0], 0.9);
    }
}

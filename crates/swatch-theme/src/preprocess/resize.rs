//! Aspect-preserving downscale.
//!
//! Area averaging: each output pixel is the alpha-weighted mean of the
//! source pixels its footprint covers. Upscaling never happens.

/// Compute the bounded canvas size for an image.
///
/// The longer side is scaled down to `max_dimension` when it exceeds it; the
/// other side follows the aspect ratio. Both sides are rounded to the nearest
/// integer and never drop below 1.
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let max = max_dimension.max(1) as f64;
    let (mut w, mut h) = (width as f64, height as f64);

    if w > h {
        if w > max {
            h *= max / w;
            w = max;
        }
    } else if h > max {
        w *= max / h;
        h = max;
    }

    let round = |v: f64| (v.round() as u32).max(1);
    (round(w), round(h))
}

/// Downscale an RGBA8 buffer to `new_width` x `new_height` by area averaging.
///
/// `rgba` must hold at least `width * height * 4` bytes. Color channels are
/// weighted by alpha so transparent regions do not darken their neighbours.
pub fn downscale_area(
    rgba: &[u8],
    width: u32,
    height: u32,
    new_width: u32,
    new_height: u32,
) -> Vec<[u8; 4]> {
    let (w, h) = (width as usize, height as usize);
    let (nw, nh) = (new_width as usize, new_height as usize);

    let pixel = |x: usize, y: usize| {
        let i = (y * w + x) * 4;
        [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]]
    };

    if nw == w && nh == h {
        return (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .map(|(x, y)| pixel(x, y))
            .collect();
    }

    let mut out = Vec::with_capacity(nw * nh);
    for dy in 0..nh {
        let y0 = dy * h / nh;
        let y1 = ((dy + 1) * h).div_ceil(nh).clamp(y0 + 1, h);

        for dx in 0..nw {
            let x0 = dx * w / nw;
            let x1 = ((dx + 1) * w).div_ceil(nw).clamp(x0 + 1, w);

            let mut weighted = [0u64; 3];
            let mut plain = [0u64; 3];
            let mut alpha_sum = 0u64;
            let mut count = 0u64;

            for y in y0..y1 {
                for x in x0..x1 {
                    let [r, g, b, a] = pixel(x, y);
                    let a = a as u64;
                    weighted[0] += r as u64 * a;
                    weighted[1] += g as u64 * a;
                    weighted[2] += b as u64 * a;
                    plain[0] += r as u64;
                    plain[1] += g as u64;
                    plain[2] += b as u64;
                    alpha_sum += a;
                    count += 1;
                }
            }

            let (sums, divisor) = if alpha_sum > 0 {
                (weighted, alpha_sum)
            } else {
                (plain, count)
            };
            let avg = |v: u64| ((v + divisor / 2) / divisor) as u8;
            out.push([
                avg(sums[0]),
                avg(sums[1]),
                avg(sums[2]),
                ((alpha_sum + count / 2) / count) as u8,
            ]);
        }
    }
    out
}

//! Pixel export
//!
//! tiny-skia stores premultiplied alpha; image encoders and host buffers
//! expect straight alpha. These helpers do the conversion once, on the way
//! out.

/// Convert premultiplied RGBA to straight RGBA
pub fn unpremultiply_alpha(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len());

    for chunk in data.chunks_exact(4) {
        let a = chunk[3];
        if a > 0 {
            result.extend_from_slice(&[
                unpremultiply(chunk[0], a),
                unpremultiply(chunk[1], a),
                unpremultiply(chunk[2], a),
                a,
            ]);
        } else {
            result.extend_from_slice(&[0, 0, 0, 0]);
        }
    }

    result
}

/// Straight tone per pixel from premultiplied RGBA (red channel)
pub fn gray_from_premultiplied(data: &[u8]) -> Vec<u8> {
    data.chunks_exact(4)
        .map(|chunk| {
            if chunk[3] > 0 {
                unpremultiply(chunk[0], chunk[3])
            } else {
                0
            }
        })
        .collect()
}

fn unpremultiply(value: u8, alpha: u8) -> u8 {
    if alpha == 255 {
        return value;
    }
    ((f32::from(value) * 255.0 / f32::from(alpha)).round()).min(255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpremultiply() {
        let premul = [64, 64, 64, 128, 10, 10, 10, 255, 5, 5, 5, 0];
        assert_eq!(
            unpremultiply_alpha(&premul),
            vec![128, 128, 128, 128, 10, 10, 10, 255, 0, 0, 0, 0]
        );
        assert_eq!(gray_from_premultiplied(&premul), vec![128, 10, 0]);
    }
}

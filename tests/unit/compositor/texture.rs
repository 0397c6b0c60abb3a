use std::io::Cursor;

use super::*;

fn png_bytes(rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(1, 1, rgba.to_vec()).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_premultiplies() {
    let tex = decode_texture(&png_bytes([100, 50, 200, 128])).unwrap();
    assert_eq!((tex.width, tex.height), (1, 1));
    assert_eq!(
        tex.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
}

#[test]
fn decode_garbage_is_an_error() {
    let err = decode_texture(b"not an image").unwrap_err();
    assert!(matches!(err, WeaveError::Other(_)));
}

#[test]
fn fs_loader_queues_success_and_failure() {
    let dir = std::env::temp_dir().join(format!("scrollweave-tex-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("a.png"), png_bytes([255, 0, 0, 255])).unwrap();

    let mut loader = FsTextureLoader::new(&dir);
    loader.request(&ItemKey::new("a"), "a.png");
    loader.request(&ItemKey::new("b"), "missing.png");
    let events = loader.drain();
    assert_eq!(events.len(), 2);
    assert!(events[0].result.is_ok());
    assert_eq!(events[1].key, ItemKey::new("b"));
    assert!(events[1].result.is_err());
    assert!(loader.drain().is_empty());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn solid_and_fallback_sizes() {
    let t = Texture::solid(2, 3, [10, 20, 30, 255]);
    assert_eq!(t.rgba8_premul.len(), 2 * 3 * 4);
    assert_eq!(&t.rgba8_premul[..4], &[10, 20, 30, 255]);

    let g = Texture::radial_fallback(8, 4);
    assert_eq!(g.rgba8_premul.len(), 8 * 4 * 4);
    assert!(g.rgba8_premul.chunks_exact(4).all(|px| px[3] == 255));
}

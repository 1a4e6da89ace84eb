use splashwalls::app::loader::{downscale, load_for_display, Loader};
use std::{thread, time::Duration};
use tempfile::tempdir;

mod common;
use common::{solid_image, write_image};

#[test]
fn loader_populates_cache_from_preloader() {
    let tmp = tempdir().unwrap();
    let img_path = tmp.path().join("sample.png");
    write_image(&img_path, &solid_image(4, 4, [10, 20, 30, 255]));

    let mut loader = Loader::new();
    loader.load_image(&img_path);
    for _ in 0..200 {
        loader.update();
        if loader.cache.contains_key(&img_path) {
            break;
        }
        thread::sleep(Duration::from_millis(25));
    }
    let cached = loader.get_from_cache(&img_path).unwrap();
    assert_eq!(cached.color_image.size, [4, 4]);

    loader.clear();
    assert!(loader.get_from_cache(&img_path).is_none());
}

#[test]
fn jpeg_fast_path_decodes() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("photo.jpg");
    let rgb = image::DynamicImage::ImageRgb8(solid_image(16, 8, [90, 90, 90, 255]).to_rgb8());
    write_image(&path, &rgb);
    let image = load_for_display(&path).unwrap();
    assert_eq!((image.width(), image.height()), (16, 8));
}

#[test]
fn downscale_keeps_small_images_and_bounds_large_ones() {
    let small = downscale(solid_image(10, 10, [0, 0, 0, 255]));
    assert_eq!((small.width(), small.height()), (10, 10));

    let large = downscale(solid_image(4000, 100, [0, 0, 0, 255]));
    assert_eq!(large.width(), 3840);
    assert!(large.height() <= 2160);
}

#[test]
fn decodes_from_before_clear_are_discarded() {
    let tmp = tempdir().unwrap();
    let stale = tmp.path().join("stale.png");
    let fresh = tmp.path().join("fresh.png");
    write_image(&stale, &solid_image(4, 4, [1, 1, 1, 255]));
    write_image(&fresh, &solid_image(4, 4, [2, 2, 2, 255]));

    let mut loader = Loader::new();
    loader.load_image(&stale);
    loader.clear();
    loader.load_image(&fresh);
    // One worker decodes in request order, so the stale result arrives first
    for _ in 0..200 {
        loader.update();
        if loader.cache.contains_key(&fresh) {
            break;
        }
        thread::sleep(Duration::from_millis(25));
    }
    assert!(loader.get_from_cache(&fresh).is_some());
    assert!(loader.get_from_cache(&stale).is_none());
}

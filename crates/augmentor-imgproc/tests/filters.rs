use augmentor_image::{Image, ImageError, ImageSize};
use augmentor_imgproc::filter::{
    box_blur, box_blur_direct, box_blur_fast, box_blur_fast_in_place, box_blur_in_place,
    gaussian_blur,
};
use augmentor_imgproc::parallel::ExecutionStrategy;
use rand::{rngs::StdRng, Rng, SeedableRng};

// above the automatic parallel threshold
const SIZE: ImageSize = ImageSize {
    width: 480,
    height: 240,
};

fn random_image(seed: u64) -> Result<Image<u8, 3>, ImageError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..SIZE.width * SIZE.height * 3)
        .map(|_| rng.random::<u8>())
        .collect();
    Image::new(SIZE, data)
}

#[test]
fn sliding_box_blur_matches_direct_on_large_image() -> Result<(), ImageError> {
    let src = random_image(1)?;

    for kernel_size in [1, 4, 9] {
        let mut sliding = Image::from_size_val(SIZE, 0)?;
        let mut direct = Image::from_size_val(SIZE, 0)?;
        box_blur(&src, &mut sliding, kernel_size)?;
        box_blur_direct(&src, &mut direct, kernel_size)?;
        assert_eq!(sliding, direct, "kernel size {kernel_size}");
    }
    Ok(())
}

#[test]
fn in_place_blurs_do_not_depend_on_strategy() -> Result<(), ImageError> {
    let src = random_image(2)?;

    let mut expected = Image::from_size_val(SIZE, 0)?;
    box_blur_fast(&src, &mut expected, 3.0, 3)?;

    for strategy in [
        ExecutionStrategy::Auto,
        ExecutionStrategy::Serial,
        ExecutionStrategy::Parallel,
    ] {
        let mut image = src.clone();
        box_blur_fast_in_place(&mut image, 3.0, 3, strategy)?;
        assert_eq!(image, expected);

        let mut single = src.clone();
        let mut reference = Image::from_size_val(SIZE, 0)?;
        box_blur_in_place(&mut single, 5, strategy)?;
        box_blur(&src, &mut reference, 5)?;
        assert_eq!(single, reference);
    }
    Ok(())
}

#[test]
fn gaussian_blur_keeps_flat_field() -> Result<(), ImageError> {
    let src = Image::<u16, 2>::from_size_val(SIZE, 1234)?;
    let mut dst = Image::from_size_val(SIZE, 0)?;

    gaussian_blur(&src, &mut dst, 13, 2.0)?;
    assert_eq!(dst, src);

    box_blur_fast(&src, &mut dst, 2.0, 5)?;
    assert_eq!(dst, src);
    Ok(())
}

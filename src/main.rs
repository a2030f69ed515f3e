use clap::Parser;
use log::{error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

mod cli;
mod logger;

use cli::{Args, ScenePreset};
use logger::init_logger;
use lumapath::output::{save_image_as_exr, save_image_as_png};
use lumapath::renderer::Renderer;
use lumapath::scene::{self, Scene};

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    // Log application startup with version information
    info!("Lumapath - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));
    info!(
        "Image resolution: {}x{}, samples per pixel: {}, seed: {}",
        args.width, args.height, args.samples_per_pixel, args.seed
    );

    let aspect_ratio = args.width as f32 / args.height as f32;
    let (world, camera) = match args.scene {
        ScenePreset::ThreeSpheres => scene::three_spheres(aspect_ratio),
        ScenePreset::Cover => {
            let mut rng = ChaCha20Rng::seed_from_u64(args.seed);
            scene::cover(aspect_ratio, &mut rng)
        }
    };
    let scene = Scene::new(world);

    let renderer = Renderer {
        image_width: args.width,
        image_height: args.height,
        samples_per_pixel: args.samples_per_pixel,
        seed: args.seed,
    };
    let image = renderer.render(&scene, &camera);

    // Save image based on file extension
    let result = if args.output.ends_with(".exr") {
        save_image_as_exr(&image, &args.output)
    } else if args.output.ends_with(".png") {
        save_image_as_png(&image, &args.output)
    } else {
        error!(
            "Unsupported file extension '{}'. Only .png and .exr formats are supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    };

    if let Err(e) = result {
        error!("Failed to save image to {}: {}", args.output, e);
        std::process::exit(1);
    }
}

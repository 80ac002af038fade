//! GPU side of the scene: camera, depth, starfield and the planet renderer.
//!
//! The planet renderer only exists once the body's textures have all
//! decoded. Until then, or after a load failure, frames show the starfield
//! alone.

use std::path::PathBuf;

use exo_config::RenderConfig;
use exo_planet::{PlanetBody, PlanetRenderer, TextureBarrier};
use exo_render::{
    DepthBuffer, FrameEncoder, OrbitCamera, RenderContext, RenderPassBuilder, ShaderLibrary,
    SurfaceError,
};
use exo_space::{Starfield, StarfieldGenerator, StarfieldRenderer};
use tracing::{error, info};

/// The backdrop every planet shares.
pub fn backdrop(config: &RenderConfig) -> Starfield {
    StarfieldGenerator::new(config.star_seed, config.star_count).generate()
}

pub struct SceneHost {
    pub camera: OrbitCamera,
    depth: DepthBuffer,
    shaders: ShaderLibrary,
    sphere_segments: u32,
    asset_dir: PathBuf,
    starfield: Starfield,
    stars: StarfieldRenderer,
    textures: Option<TextureBarrier>,
    planet: Option<PlanetRenderer>,
}

impl SceneHost {
    pub fn new(gpu: &RenderContext, config: &RenderConfig, body: &PlanetBody) -> Self {
        let width = gpu.surface_config.width;
        let height = gpu.surface_config.height;
        let camera = OrbitCamera::new(config.camera_distance, config.fov_degrees, gpu.aspect_ratio());

        let starfield = backdrop(config);
        let stars = StarfieldRenderer::new(&gpu.device, gpu.surface_format, &starfield);

        let mut scene = Self {
            camera,
            depth: DepthBuffer::new(&gpu.device, width, height),
            shaders: ShaderLibrary::new(),
            sphere_segments: config.sphere_segments,
            asset_dir: config.asset_dir.clone(),
            starfield,
            stars,
            textures: None,
            planet: None,
        };
        scene.load_textures(body);
        scene
    }

    fn load_textures(&mut self, body: &PlanetBody) {
        let paths = body.variant().texture_paths();
        info!(planet = body.name(), textures = paths.len(), "Loading planet textures");
        self.planet = None;
        self.textures = Some(TextureBarrier::spawn(&self.asset_dir, paths));
    }

    /// A different body was mounted: drop its renderer and start loading
    /// the new texture set. The starfield carries over.
    pub fn remount(&mut self, body: &PlanetBody) {
        self.load_textures(body);
    }

    pub fn resize(&mut self, gpu: &RenderContext, width: u32, height: u32) {
        self.camera.set_aspect_ratio(width as f32, height as f32);
        self.depth.resize(&gpu.device, width, height);
    }

    /// Per-step backdrop animation.
    pub fn flicker(&mut self) {
        self.starfield.flicker();
    }

    /// Build the planet renderer once the barrier resolves.
    fn poll_textures(&mut self, gpu: &RenderContext, body: &PlanetBody) {
        let Some(result) = self.textures.as_ref().and_then(TextureBarrier::poll) else {
            return;
        };
        self.textures = None;

        let textures = match result {
            Ok(textures) => textures,
            Err(e) => {
                error!(planet = body.name(), "Texture load failed, planet not rendered: {e}");
                return;
            }
        };

        match PlanetRenderer::new(
            &gpu.device,
            &gpu.queue,
            gpu.surface_format,
            &mut self.shaders,
            body,
            &textures,
            self.sphere_segments,
        ) {
            Ok(renderer) => self.planet = Some(renderer),
            Err(e) => error!(planet = body.name(), "Planet renderer setup failed: {e}"),
        }
    }

    /// Draw one frame: starfield first, then the planet layers in order.
    pub fn render(&mut self, gpu: &RenderContext, body: &PlanetBody) -> Result<(), SurfaceError> {
        self.poll_textures(gpu, body);

        let surface_texture = gpu.get_current_texture()?;
        let camera = self.camera.to_uniform();
        self.stars.update(&gpu.queue, &camera, &self.starfield);
        if let Some(planet) = &self.planet {
            planet.update(&gpu.queue, &camera, body);
        }

        let mut frame = FrameEncoder::new(&gpu.device, gpu.queue.clone(), surface_texture);
        let builder = RenderPassBuilder::new()
            .depth(self.depth.view.clone())
            .label("scene-pass");
        {
            let mut pass = frame.begin_render_pass(&builder);
            self.stars.render(&mut pass);
            if let Some(planet) = &self.planet {
                planet.render(&mut pass);
            }
        }
        frame.submit();
        Ok(())
    }
}

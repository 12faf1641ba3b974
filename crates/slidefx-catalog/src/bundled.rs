//! Bundled effect programs
//!
//! These programs are embedded in the binary. Several effects share a
//! vertex or fragment stage; the binding lists below are per effect.

/// Bundled effect data
#[derive(Debug)]
pub struct BundledEffect {
    pub key: &'static str,
    pub attributes: &'static [&'static str],
    pub uniforms: &'static [&'static str],
    pub vertex: &'static str,
    pub fragment: &'static str,
}

/// Catalog keys of the bundled effects
///
/// Keys are case-sensitive and part of the host contract.
pub mod keys {
    pub const DEFAULT_TEXTURE: &str = "defaultTexture";
    pub const DEFAULT_TEXTURE_AND_OPACITY: &str = "defaultTextureAndOpacity";
    pub const CONTENTS: &str = "contents";
    pub const IRIS: &str = "iris";
    pub const TWIST: &str = "twist";
    pub const COLOR_PLANES: &str = "colorPlanes";
    pub const FLOP: &str = "flop";
    pub const ANVIL_SMOKE: &str = "anvilsmoke";
    pub const ANVIL_SPECK: &str = "anvilspeck";
    pub const FLAME: &str = "flame";
    pub const CONFETTI: &str = "confetti";
    pub const DIFFUSE: &str = "diffuse";
    pub const FIREWORKS: &str = "fireworks";
    pub const FIREWORKS_TRAILS: &str = "fireworkstrails";
    pub const HORIZONTAL_GAUSSIAN_BLUR: &str = "horizontalGaussianBlur";
    pub const VERTICAL_GAUSSIAN_BLUR: &str = "verticalGaussianBlur";
    pub const BLOOM: &str = "bloom";
    pub const SHIMMER_OBJECT: &str = "shimmerObject";
    pub const SHIMMER_PARTICLE: &str = "shimmerParticle";
    pub const SPARKLE: &str = "sparkle";
}

const TEXTURED_QUAD_VERT: &str = include_str!("../shaders/textured_quad.vert");
const PARTICLE_FRAG: &str = include_str!("../shaders/particle.frag");
const FULLSCREEN_QUAD_VERT: &str = include_str!("../shaders/fullscreen_quad.vert");
const POSITION_ONLY_VERT: &str = include_str!("../shaders/position_only.vert");

/// Plain textured quad
pub const DEFAULT_TEXTURE: BundledEffect = BundledEffect {
    key: keys::DEFAULT_TEXTURE,
    attributes: &["Position", "TexCoord"],
    uniforms: &["MVPMatrix", "Texture"],
    vertex: TEXTURED_QUAD_VERT,
    fragment: include_str!("../shaders/default_texture.frag"),
};

/// Textured quad faded by `Opacity`
pub const DEFAULT_TEXTURE_AND_OPACITY: BundledEffect = BundledEffect {
    key: keys::DEFAULT_TEXTURE_AND_OPACITY,
    attributes: &["Position", "TexCoord"],
    uniforms: &["MVPMatrix", "Texture", "Opacity"],
    vertex: TEXTURED_QUAD_VERT,
    fragment: include_str!("../shaders/default_texture_opacity.frag"),
};

/// Crossfade between two textures
pub const CONTENTS: BundledEffect = BundledEffect {
    key: keys::CONTENTS,
    attributes: &["Position", "TexCoord"],
    uniforms: &["MVPMatrix", "Texture", "Texture2", "mixFactor"],
    vertex: TEXTURED_QUAD_VERT,
    fragment: include_str!("../shaders/contents.frag"),
};

/// Elliptical iris wipe, opening or closing
pub const IRIS: BundledEffect = BundledEffect {
    key: keys::IRIS,
    attributes: &["Position", "TexCoord"],
    uniforms: &["PercentForAlpha", "Scale", "Mix", "Texture", "MVPMatrix", "Opacity"],
    vertex: TEXTURED_QUAD_VERT,
    fragment: include_str!("../shaders/iris.frag"),
};

/// Lit twisting page with specular highlight
pub const TWIST: BundledEffect = BundledEffect {
    key: keys::TWIST,
    attributes: &["Position", "TexCoord", "Normal"],
    uniforms: &["TextureMatrix", "SpecularColor", "FlipNormals", "MVPMatrix", "Texture"],
    vertex: include_str!("../shaders/twist.vert"),
    fragment: include_str!("../shaders/twist.frag"),
};

/// Per-channel colour plane with optional flipped texture coordinates
pub const COLOR_PLANES: BundledEffect = BundledEffect {
    key: keys::COLOR_PLANES,
    attributes: &["Position", "TexCoord"],
    uniforms: &["MVPMatrix", "FlipTexCoords", "Texture", "ColorMask"],
    vertex: include_str!("../shaders/color_planes.vert"),
    fragment: include_str!("../shaders/color_planes.frag"),
};

/// Lit page flop, diffuse only
pub const FLOP: BundledEffect = BundledEffect {
    key: keys::FLOP,
    attributes: &["Position", "TexCoord", "Normal"],
    uniforms: &["TextureMatrix", "FlipNormals", "MVPMatrix", "Texture"],
    vertex: include_str!("../shaders/flop.vert"),
    fragment: include_str!("../shaders/flop.frag"),
};

/// Anvil smoke puffs
pub const ANVIL_SMOKE: BundledEffect = BundledEffect {
    key: keys::ANVIL_SMOKE,
    attributes: &[
        "Rotation",
        "Speed",
        "Scale",
        "LifeSpan",
        "ParticleTexCoord",
        "Center",
        "Position",
    ],
    uniforms: &["Percent", "Opacity", "ParticleTexture", "MVPMatrix"],
    vertex: include_str!("../shaders/anvil_smoke.vert"),
    fragment: PARTICLE_FRAG,
};

/// Anvil dust specks thrown on a sine arc
pub const ANVIL_SPECK: BundledEffect = BundledEffect {
    key: keys::ANVIL_SPECK,
    attributes: &["Speed", "Scale", "LifeSpan", "ParticleTexCoord", "Center", "Position"],
    uniforms: &["Percent", "Opacity", "ParticleTexture", "MVPMatrix"],
    vertex: include_str!("../shaders/anvil_speck.vert"),
    fragment: PARTICLE_FRAG,
};

/// Flame particles with white-yellow-red ramp and smoke
pub const FLAME: BundledEffect = BundledEffect {
    key: keys::FLAME,
    attributes: &["Rotation", "Speed", "LifeSpan", "ParticleTexCoord", "Center", "Position"],
    uniforms: &[
        "Percent",
        "Duration",
        "Opacity",
        "RotationMax",
        "SpeedMax",
        "ParticleTexture",
        "MVPMatrix",
    ],
    vertex: include_str!("../shaders/flame.vert"),
    fragment: PARTICLE_FRAG,
};

/// Tumbling confetti shaded by facing
pub const CONFETTI: BundledEffect = BundledEffect {
    key: keys::CONFETTI,
    attributes: &["Rotation", "Speed", "TexCoord", "Center", "Position"],
    uniforms: &["Percent", "Opacity", "ParticleTexture", "MVPMatrix"],
    vertex: include_str!("../shaders/confetti.vert"),
    fragment: include_str!("../shaders/confetti.frag"),
};

/// Diffuse dissolve particles
pub const DIFFUSE: BundledEffect = BundledEffect {
    key: keys::DIFFUSE,
    attributes: &["Rotation", "Speed", "TexCoord", "Center", "Position", "LifeSpan"],
    uniforms: &["Percent", "Opacity", "ParticleTexture", "MVPMatrix", "RotationMax", "SpeedMax"],
    vertex: include_str!("../shaders/diffuse.vert"),
    fragment: PARTICLE_FRAG,
};

/// Firework burst particles with motion blur and sparkle
pub const FIREWORKS: BundledEffect = BundledEffect {
    key: keys::FIREWORKS,
    attributes: &["Color", "Speed", "LifeSpan", "Scale", "ParticleTexCoord", "Center", "Position"],
    uniforms: &[
        "Percent",
        "PreviousPercent",
        "Gravity",
        "StartScale",
        "ShouldSparkle",
        "SparklePeriod",
        "ParticleBurstTiming",
        "PreviousParticleBurstTiming",
        "SpeedMax",
        "ParticleTexture",
        "Opacity",
        "MVPMatrix",
    ],
    vertex: include_str!("../shaders/fireworks.vert"),
    fragment: include_str!("../shaders/fireworks.frag"),
};

/// Noisy fade of the accumulated firework trail buffer
pub const FIREWORKS_TRAILS: BundledEffect = BundledEffect {
    key: keys::FIREWORKS_TRAILS,
    attributes: &["Position", "TexCoord"],
    uniforms: &["Texture", "Opacity", "NoiseAmount", "NoiseSeed", "NoiseMax", "MVPMatrix"],
    vertex: FULLSCREEN_QUAD_VERT,
    fragment: include_str!("../shaders/fireworks_trails.frag"),
};

/// Horizontal pass of the separable 5-tap Gaussian
pub const HORIZONTAL_GAUSSIAN_BLUR: BundledEffect = BundledEffect {
    key: keys::HORIZONTAL_GAUSSIAN_BLUR,
    attributes: &["Position"],
    uniforms: &["Texture", "TextureSize", "MVPMatrix"],
    vertex: POSITION_ONLY_VERT,
    fragment: include_str!("../shaders/horizontal_blur.frag"),
};

/// Vertical pass of the separable 5-tap Gaussian
pub const VERTICAL_GAUSSIAN_BLUR: BundledEffect = BundledEffect {
    key: keys::VERTICAL_GAUSSIAN_BLUR,
    attributes: &["Position"],
    uniforms: &["Texture", "TextureSize", "MVPMatrix"],
    vertex: POSITION_ONLY_VERT,
    fragment: include_str!("../shaders/vertical_blur.frag"),
};

/// Bloom composite of a frame and its blur
pub const BLOOM: BundledEffect = BundledEffect {
    key: keys::BLOOM,
    attributes: &["Position", "TexCoord"],
    uniforms: &["Texture", "BlurTexture", "BloomAmount", "MVPMatrix"],
    vertex: FULLSCREEN_QUAD_VERT,
    fragment: include_str!("../shaders/bloom.frag"),
};

/// Shimmer object pieces drifting apart
pub const SHIMMER_OBJECT: BundledEffect = BundledEffect {
    key: keys::SHIMMER_OBJECT,
    attributes: &["Position", "Center", "TexCoord", "Color", "Speed"],
    uniforms: &["Percent", "Opacity", "RotationMatrix", "SpeedMax", "Texture", "MVPMatrix"],
    vertex: include_str!("../shaders/shimmer_object.vert"),
    fragment: include_str!("../shaders/shimmer_object.frag"),
};

/// Shimmer glints, persistent or timed
pub const SHIMMER_PARTICLE: BundledEffect = BundledEffect {
    key: keys::SHIMMER_PARTICLE,
    attributes: &["Position", "Center", "ParticleTexCoord", "Color", "LifeSpan", "Speed", "Scale"],
    uniforms: &[
        "Percent",
        "Opacity",
        "ParticleScalePercent",
        "RotationMatrix",
        "SpeedMax",
        "ParticleTexture",
        "MVPMatrix",
    ],
    vertex: include_str!("../shaders/shimmer_particle.vert"),
    fragment: PARTICLE_FRAG,
};

/// Sparkle glints
pub const SPARKLE: BundledEffect = BundledEffect {
    key: keys::SPARKLE,
    attributes: &["Scale", "LifeSpan", "Speed", "ParticleTexCoord", "Center", "Position"],
    uniforms: &["Percent", "Opacity", "Color", "SpeedMax", "ParticleTexture", "MVPMatrix"],
    vertex: include_str!("../shaders/sparkle.vert"),
    fragment: PARTICLE_FRAG,
};

/// All bundled effects
pub const ALL_EFFECTS: &[&BundledEffect] = &[
    &DEFAULT_TEXTURE,
    &DEFAULT_TEXTURE_AND_OPACITY,
    &CONTENTS,
    &IRIS,
    &TWIST,
    &COLOR_PLANES,
    &FLOP,
    &ANVIL_SMOKE,
    &ANVIL_SPECK,
    &FLAME,
    &CONFETTI,
    &DIFFUSE,
    &FIREWORKS,
    &FIREWORKS_TRAILS,
    &HORIZONTAL_GAUSSIAN_BLUR,
    &VERTICAL_GAUSSIAN_BLUR,
    &BLOOM,
    &SHIMMER_OBJECT,
    &SHIMMER_PARTICLE,
    &SPARKLE,
];

/// Get a bundled effect by key
pub fn get_bundled_effect(key: &str) -> Option<&'static BundledEffect> {
    ALL_EFFECTS.iter().find(|e| e.key == key).copied()
}

/// List all bundled effect keys, in table order
pub fn bundled_effect_keys() -> Vec<&'static str> {
    ALL_EFFECTS.iter().map(|e| e.key).collect()
}

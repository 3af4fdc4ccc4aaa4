//! GLSL ES 3.00 sources. Both demos draw one full-screen quad.

/// Clip-space quad; vertices come in at attribute location 0.
pub const FULLSCREEN_VS: &str = r#"#version 300 es
layout(location = 0) in vec2 aPosition;
out vec2 vUv;

void main() {
    vUv = aPosition * 0.5 + 0.5;
    gl_Position = vec4(aPosition, 0.0, 1.0);
}
"#;

/// Hashed grid with a fake Lambert term.
pub const GRID_FS: &str = r#"#version 300 es
precision highp float;

uniform vec2 uResolution;
uniform vec3 uLightDirection;
uniform vec2 uGridSize;

out vec4 fragColor;

vec3 rgbToHsv(vec3 c) {
    float cMax = max(c.r, max(c.g, c.b));
    float cMin = min(c.r, min(c.g, c.b));
    float delta = cMax - cMin;

    float h = 0.0;
    if (delta > 0.0) {
        if (cMax == c.r) {
            h = mod((c.g - c.b) / delta, 6.0);
        } else if (cMax == c.g) {
            h = (c.b - c.r) / delta + 2.0;
        } else {
            h = (c.r - c.g) / delta + 4.0;
        }
        h /= 6.0;
    }
    float s = cMax == 0.0 ? 0.0 : delta / cMax;
    return vec3(h, s, cMax);
}

float heightOf(vec3 color) {
    vec3 hsv = rgbToHsv(color);
    return hsv.x + hsv.y;
}

void main() {
    vec2 uv = gl_FragCoord.xy / uResolution;
    vec2 cell = floor(uv * uGridSize) / uGridSize;

    vec3 color = vec3(fract(sin(dot(cell, vec2(12.9898, 78.233))) * 43758.5453));
    float height = heightOf(color);

    vec3 normal = normalize(vec3(0.0, 0.0, 1.0) + height * uLightDirection);
    float intensity = max(0.0, dot(normal, normalize(uLightDirection)));

    fragColor = vec4(color * intensity, 1.0);
}
"#;

/// Toy diffusion: blends the previous frame's neighbourhood toward a
/// time-scrolled sample of the noise texture.
pub const FEEDBACK_FS: &str = r#"#version 300 es
precision highp float;

uniform vec2 uResolution;
uniform float uTime;
uniform sampler2D uPrevFrame;
uniform sampler2D uPressure;

in vec2 vUv;
out vec4 fragColor;

void main() {
    vec2 texel = 1.0 / uResolution;
    vec3 prev = texture(uPrevFrame, vUv).rgb;
    vec3 blur = (
        texture(uPrevFrame, vUv + vec2(texel.x, 0.0)).rgb +
        texture(uPrevFrame, vUv - vec2(texel.x, 0.0)).rgb +
        texture(uPrevFrame, vUv + vec2(0.0, texel.y)).rgb +
        texture(uPrevFrame, vUv - vec2(0.0, texel.y)).rgb
    ) * 0.25;

    float x = fract(vUv.x + uTime * 0.05);
    vec3 pressure = texture(uPressure, vec2(x, 0.5)).rgb;
    float band = smoothstep(0.0, 0.02, abs(vUv.y - pressure.r));

    vec3 diffused = mix(prev, blur, 0.5);
    vec3 color = mix(pressure, diffused, 0.96 * band);
    fragColor = vec4(color, 1.0);
}
"#;

/// Texture units the feedback shader samples from.
pub const PREV_FRAME_UNIT: u32 = 0;
pub const PRESSURE_UNIT: u32 = 1;

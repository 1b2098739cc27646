//! WGSL sources shared by the shader, registry and frame-loop tests.

pub(crate) const VERTEX: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) color: vec3<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(position, 1.0);
    out.color = color;
    return out;
}
"#;

pub(crate) const FRAGMENT: &str = r#"
@group(0) @binding(0) var<uniform> input_color: vec4<f32>;

@fragment
fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(color, 1.0) * input_color;
}
"#;

/// Same interface as [`FRAGMENT`], uniform-only output.
pub(crate) const FRAGMENT_FLAT: &str = r#"
@group(0) @binding(0) var<uniform> input_color: vec4<f32>;

@fragment
fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
    return input_color;
}
"#;

pub(crate) const FRAGMENT_SYNTAX_ERROR: &str = r#"
@group(0) @binding(0) var<uniform> input_color: vec4<f32>;

@fragment
fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(color, 1.0) * input_color
"#;

/// Valid fragment stage that never declares `input_color`.
pub(crate) const FRAGMENT_NO_UNIFORM: &str = r#"
@fragment
fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(color, 1.0);
}
"#;

/// Binds a second uniform the pipeline layout knows nothing about.
pub(crate) const FRAGMENT_EXTRA_BINDING: &str = r#"
@group(0) @binding(0) var<uniform> input_color: vec4<f32>;
@group(0) @binding(1) var<uniform> tint: vec4<f32>;

@fragment
fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(color, 1.0) * input_color * tint;
}
"#;

/// Reads a varying the vertex stage never writes.
pub(crate) const FRAGMENT_EXTRA_INPUT: &str = r#"
@group(0) @binding(0) var<uniform> input_color: vec4<f32>;

@fragment
fn fs_main(@location(0) color: vec3<f32>, @location(3) uv: vec2<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(color, uv.x) * input_color;
}
"#;

/// Reads location 0 with a different type than the vertex stage writes.
pub(crate) const FRAGMENT_TYPE_MISMATCH: &str = r#"
@group(0) @binding(0) var<uniform> input_color: vec4<f32>;

@fragment
fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
    return color * input_color;
}
"#;

/// Consumes a vertex attribute the triangle geometry does not provide.
pub(crate) const VERTEX_EXTRA_ATTRIBUTE: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
    @location(2) normal: vec3<f32>,
) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(position + normal * 0.0, 1.0);
    out.color = color;
    return out;
}
"#;

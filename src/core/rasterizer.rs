use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use log::warn;

use super::display_context::DisplayContext;
use super::lighting::{shade, Light, Material, DEFAULT_AMBIENT_MODEL};
use crate::math::{MatrixStack, Rgba};
use crate::traits::{LightChannel, LightSlot, MaterialChannel, RenderBackend};

/// Vertices with a clip-space w below this are treated as behind the eye
const MIN_CLIP_W: f32 = 1e-5;

#[derive(Debug, Clone, Copy)]
struct ShadedVertex {
    clip: Vec4,
    color: Vec4,
}

#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    pos: Vec2,
    depth: f32,
    color: Vec4,
}

/// CPU implementation of the fixed-function pipeline
///
/// Lighting is evaluated per vertex when the vertex is emitted, fans are
/// expanded around their first vertex, and triangles are depth tested into
/// an RGBA8 buffer that can be uploaded to a texture as-is.
pub struct SoftwareBackend {
    width: u32,
    height: u32,
    color: Vec<[u8; 4]>,
    depth: Vec<f32>,
    clear_color: [u8; 4],

    projection: Mat4,
    modelview: MatrixStack,
    /// Inverse transpose of the modelview top, cleared whenever it changes
    normal_matrix: Option<Mat3>,

    normal: Vec3,
    material: Material,
    lights: [Light; LightSlot::COUNT],
    ambient_model: Rgba,

    fan: Vec<ShadedVertex>,
    in_fan: bool,
    triangles: usize,
}

impl SoftwareBackend {
    pub fn new(width: u32, height: u32) -> Self {
        let pixels = (width as usize) * (height as usize);
        Self {
            width,
            height,
            color: vec![[0, 0, 0, 255]; pixels],
            depth: vec![1.0; pixels],
            clear_color: [0, 0, 0, 255],
            projection: Mat4::IDENTITY,
            modelview: MatrixStack::new(),
            normal_matrix: None,
            normal: Vec3::Z,
            material: Material::default(),
            lights: LightSlot::ALL.map(Light::default_for),
            ambient_model: DEFAULT_AMBIENT_MODEL,
            fan: Vec::with_capacity(8),
            in_fan: false,
            triangles: 0,
        }
    }

    pub fn from_context(context: &DisplayContext) -> Self {
        Self::new(context.width, context.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocate the buffers; contents are reset to the last clear colour
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        let pixels = (width as usize) * (height as usize);
        self.width = width;
        self.height = height;
        self.color = vec![self.clear_color; pixels];
        self.depth = vec![1.0; pixels];
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.color
    }

    /// Row-major RGBA8 bytes, top row first
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.color.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Pixels that differ from the last clear colour
    pub fn lit_pixel_count(&self) -> usize {
        self.color.iter().filter(|&&p| p != self.clear_color).count()
    }

    /// Triangles rasterised since the last clear
    pub fn triangles_drawn(&self) -> usize {
        self.triangles
    }

    pub fn light(&self, slot: LightSlot) -> &Light {
        &self.lights[slot.index()]
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn transform_depth(&self) -> usize {
        self.modelview.depth()
    }

    fn to_screen(&self, v: &ShadedVertex) -> ScreenVertex {
        let ndc = v.clip.truncate() / v.clip.w;
        ScreenVertex {
            pos: Vec2::new(
                (ndc.x * 0.5 + 0.5) * self.width as f32,
                (0.5 - ndc.y * 0.5) * self.height as f32,
            ),
            depth: ndc.z,
            color: v.color,
        }
    }

    fn rasterize(&mut self, a: ShadedVertex, b: ShadedVertex, c: ShadedVertex) {
        if a.clip.w < MIN_CLIP_W || b.clip.w < MIN_CLIP_W || c.clip.w < MIN_CLIP_W {
            return;
        }
        if self.width == 0 || self.height == 0 {
            return;
        }

        let (a, b, c) = (self.to_screen(&a), self.to_screen(&b), self.to_screen(&c));
        let area = edge(a.pos, b.pos, c.pos);
        if area.abs() < f32::EPSILON {
            return;
        }

        let min = a.pos.min(b.pos).min(c.pos).floor().max(Vec2::ZERO);
        let max = a
            .pos
            .max(b.pos)
            .max(c.pos)
            .ceil()
            .min(Vec2::new(self.width as f32, self.height as f32));
        if min.x >= max.x || min.y >= max.y {
            return;
        }

        self.triangles += 1;

        for y in min.y as u32..max.y as u32 {
            for x in min.x as u32..max.x as u32 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b.pos, c.pos, p) / area;
                let w1 = edge(c.pos, a.pos, p) / area;
                let w2 = edge(a.pos, b.pos, p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let z = w0 * a.depth + w1 * b.depth + w2 * c.depth;
                let idx = y as usize * self.width as usize + x as usize;
                if !(0.0..=1.0).contains(&z) || z >= self.depth[idx] {
                    continue;
                }

                let color = a.color * w0 + b.color * w1 + c.color * w2;
                self.depth[idx] = z;
                self.color[idx] = Rgba::from_vec4(color).to_rgba8();
            }
        }
    }

    fn normal_matrix(&mut self) -> Mat3 {
        let modelview = &self.modelview;
        *self
            .normal_matrix
            .get_or_insert_with(|| Mat3::from_mat4(modelview.top()).inverse().transpose())
    }
}

/// Twice the signed area of triangle (a, b, p)
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

impl RenderBackend for SoftwareBackend {
    fn clear(&mut self, color: Rgba) {
        self.clear_color = color.to_rgba8();
        self.color.fill(self.clear_color);
        self.depth.fill(1.0);
        self.triangles = 0;
    }

    fn set_normal(&mut self, normal: Vec3) {
        self.normal = normal;
    }

    fn begin_fan(&mut self) {
        self.fan.clear();
        self.in_fan = true;
    }

    fn emit_vertex(&mut self, position: Vec3) {
        if !self.in_fan {
            return;
        }
        let eye = self.modelview.top() * position.extend(1.0);
        let normal = (self.normal_matrix() * self.normal).normalize_or_zero();

        let color = shade(
            eye.truncate(),
            normal,
            &self.material,
            &self.lights,
            self.ambient_model,
        );

        self.fan.push(ShadedVertex {
            clip: self.projection * eye,
            color: color.to_vec4(),
        });
    }

    fn end_fan(&mut self) {
        if !self.in_fan {
            return;
        }
        self.in_fan = false;
        let fan = std::mem::take(&mut self.fan);
        for i in 1..fan.len().saturating_sub(1) {
            self.rasterize(fan[0], fan[i], fan[i + 1]);
        }
        self.fan = fan;
    }

    fn push_transform(&mut self) {
        // the copied top is unchanged, so the cached normal matrix still holds
        self.modelview.push();
    }

    fn pop_transform(&mut self) {
        if self.modelview.pop() {
            self.normal_matrix = None;
        } else {
            warn!("Transform stack underflow, pop ignored");
        }
    }

    fn rotate(&mut self, degrees: f32, axis: Vec3) {
        self.modelview.rotate(degrees, axis);
        self.normal_matrix = None;
    }

    fn translate(&mut self, offset: Vec3) {
        self.modelview.translate(offset);
        self.normal_matrix = None;
    }

    fn scale(&mut self, factor: Vec3) {
        self.modelview.scale(factor);
        self.normal_matrix = None;
    }

    fn set_color(&mut self, color: Rgba) {
        self.material.track_color(color);
    }

    fn set_material(&mut self, channel: MaterialChannel, color: Rgba) {
        self.material.set(channel, color);
    }

    fn set_shininess(&mut self, exponent: f32) {
        self.material.shininess = exponent.clamp(0.0, 128.0);
    }

    fn enable_light(&mut self, slot: LightSlot) {
        self.lights[slot.index()].enabled = true;
    }

    fn disable_light(&mut self, slot: LightSlot) {
        self.lights[slot.index()].enabled = false;
    }

    fn set_light_position(&mut self, slot: LightSlot, position: Vec4) {
        self.lights[slot.index()].position = self.modelview.top() * position;
    }

    fn set_light_color(&mut self, slot: LightSlot, channel: LightChannel, color: Rgba) {
        self.lights[slot.index()].set(channel, color);
    }

    fn set_ambient_model(&mut self, color: Rgba) {
        self.ambient_model = color;
    }

    fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    fn load_view(&mut self, view: Mat4) {
        self.modelview.load(view);
        self.normal_matrix = None;
    }
}

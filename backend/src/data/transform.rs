use std::fmt;

use lyon::geom::euclid::{ Point2D, Transform2D, Vector2D };

use super::prelude::{ GridSpace, ScreenSpace };
use crate::error::{ GridError, Result };

/// 2D affine map between two coordinate spaces.
///
/// The grid only ever uses the scale and translation parts, but the full
/// six-component form is kept so the matrix can be handed to a backend as is.
pub struct AffineTransform<Src = GridSpace, Dst = ScreenSpace> {
    mat: Transform2D<f32, Src, Dst>,
}

/// The camera: grid frame to screen pixels.
pub type ViewTransform = AffineTransform<GridSpace, ScreenSpace>;

impl<Src, Dst> AffineTransform<Src, Dst> {
    pub fn identity() -> Self {
        Self { mat: Transform2D::identity() }
    }

    pub fn from_scale_translation(sx: f32, sy: f32, tx: f32, ty: f32) -> Result<Self> {
        check_multipliers(sx, sy)?;
        if !(tx.is_finite() && ty.is_finite()) {
            return Err(GridError::DegenerateTransform { determinant: sx * sy });
        }

        Ok(Self { mat: Transform2D::new(sx, 0.0, 0.0, sy, tx, ty) })
    }

    pub fn from_matrix(mat: Transform2D<f32, Src, Dst>) -> Self {
        Self { mat }
    }

    pub fn apply(&self, p: Point2D<f32, Src>) -> Point2D<f32, Dst> {
        self.mat.transform_point(p)
    }

    pub fn invert(&self) -> Result<AffineTransform<Dst, Src>> {
        let determinant = self.mat.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            return Err(GridError::DegenerateTransform { determinant });
        }

        self.mat
            .inverse()
            .map(|mat| AffineTransform { mat })
            .ok_or(GridError::DegenerateTransform { determinant })
    }

    /// Pans in destination units, independent of the current scale.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.mat.m31 += dx;
        self.mat.m32 += dy;
    }

    /// Multiplies the scale factors in the source frame. The translation is
    /// left alone, so the view scales about the source origin.
    pub fn scale(&mut self, sx: f32, sy: f32) -> Result<()> {
        check_multipliers(sx, sy)?;

        let mut mat = self.mat;
        mat.m11 *= sx;
        mat.m12 *= sx;
        mat.m21 *= sy;
        mat.m22 *= sy;

        let determinant = mat.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            return Err(GridError::InvalidScale { sx, sy });
        }

        self.mat = mat;
        Ok(())
    }

    /// Scales while keeping the image of `anchor` where it was.
    pub fn scale_about(&mut self, sx: f32, sy: f32, anchor: Point2D<f32, Src>) -> Result<()> {
        let old = self.apply(anchor);

        let mut scaled = *self;
        scaled.scale(sx, sy)?;
        let new = scaled.apply(anchor);
        scaled.translate(old.x - new.x, old.y - new.y);

        *self = scaled;
        Ok(())
    }

    /// Zoom to cursor: the source point currently shown at `focus` is still
    /// shown at `focus` afterwards.
    pub fn scale_about_focus(&mut self, sx: f32, sy: f32, focus: Point2D<f32, Dst>) -> Result<()> {
        let anchor = self.invert()?.apply(focus);
        self.scale_about(sx, sy, anchor)
    }

    /// `self` first, then `other`.
    pub fn then<NewDst>(&self, other: &AffineTransform<Dst, NewDst>) -> AffineTransform<Src, NewDst> {
        AffineTransform { mat: self.mat.then(&other.mat) }
    }

    pub fn scale_factors(&self) -> (f32, f32) {
        (self.mat.m11, self.mat.m22)
    }

    pub fn translation(&self) -> Vector2D<f32, Dst> {
        Vector2D::new(self.mat.m31, self.mat.m32)
    }

    pub fn to_array(&self) -> [f32; 6] {
        self.mat.to_array()
    }

    pub fn approx_eq(&self, other: &Self, eps: f32) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

fn check_multipliers(sx: f32, sy: f32) -> Result<()> {
    if sx.is_finite() && sy.is_finite() && sx > 0.0 && sy > 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidScale { sx, sy })
    }
}

impl<Src, Dst> Default for AffineTransform<Src, Dst> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<Src, Dst> Clone for AffineTransform<Src, Dst> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Src, Dst> Copy for AffineTransform<Src, Dst> {}

impl<Src, Dst> PartialEq for AffineTransform<Src, Dst> {
    fn eq(&self, other: &Self) -> bool {
        self.mat == other.mat
    }
}

impl<Src, Dst> fmt::Debug for AffineTransform<Src, Dst> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [m11, m12, m21, m22, m31, m32] = self.to_array();
        f.debug_struct("AffineTransform")
            .field("scale", &(m11, m22))
            .field("shear", &(m12, m21))
            .field("translation", &(m31, m32))
            .finish()
    }
}

#[cfg(test)]
mod test_transform {
    use super::*;
    use crate::data::prelude::*;

    const EPS: f32 = 1e-3;

    fn assert_near<U>(a: Point2D<f32, U>, b: Point2D<f32, U>) {
        assert!((a.x - b.x).abs() <= EPS && (a.y - b.y).abs() <= EPS, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_apply() {
        let t = ViewTransform::from_scale_translation(2.0, 3.0, 10.0, -5.0).unwrap();
        assert_eq!(t.apply(GridPoint::new(4.0, 1.0)), ScreenPoint::new(18.0, -2.0));
        assert_eq!(ViewTransform::identity().apply(GridPoint::new(4.0, 1.0)), ScreenPoint::new(4.0, 1.0));
    }

    #[test]
    fn test_round_trip() {
        let transforms = [
            ViewTransform::identity(),
            ViewTransform::from_scale_translation(2.5, 0.5, 30.0, -12.0).unwrap(),
            ViewTransform::from_scale_translation(0.01, 40.0, -1000.0, 3.25).unwrap(),
            ViewTransform::from_matrix(Transform2D::new(1.5, 0.25, -0.5, 2.0, 7.0, 9.0)),
        ];
        let points = [
            GridPoint::new(0.0, 0.0),
            GridPoint::new(7.25, -3.0),
            GridPoint::new(-120.0, 480.5),
        ];

        for t in transforms.iter() {
            let inv = t.invert().unwrap();
            for p in points.iter() {
                assert_near(inv.apply(t.apply(*p)), *p);
            }
        }
    }

    #[test]
    fn test_invert_degenerate() {
        let t = ViewTransform::from_matrix(Transform2D::new(0.0, 0.0, 0.0, 1.0, 5.0, 5.0));
        assert!(matches!(t.invert(), Err(GridError::DegenerateTransform { .. })));
    }

    #[test]
    fn test_pan_inverse() {
        let original = ViewTransform::from_scale_translation(1.5, 1.5, 30.0, -4.0).unwrap();
        let mut t = original;

        t.translate(13.0, -7.0);
        assert_eq!(t.translation(), ScreenVector::new(43.0, -11.0));
        assert_eq!(t.scale_factors(), (1.5, 1.5));
        t.translate(-13.0, 7.0);
        assert_eq!(t, original);
    }

    #[test]
    fn test_scale_keeps_translation() {
        let mut t = ViewTransform::from_scale_translation(1.0, 1.0, 20.0, 10.0).unwrap();
        t.scale(2.0, 4.0).unwrap();

        assert_eq!(t.scale_factors(), (2.0, 4.0));
        assert_eq!(t.translation(), ScreenVector::new(20.0, 10.0));
        assert_eq!(t.apply(GridPoint::new(1.0, 1.0)), ScreenPoint::new(22.0, 14.0));
    }

    #[test]
    fn test_scale_rejects_degenerate() {
        let original = ViewTransform::from_scale_translation(1.0, 1.0, 5.0, 5.0).unwrap();
        let mut t = original;

        for (sx, sy) in [(0.0, 1.0), (1.0, 0.0), (-2.0, 1.0), (f32::NAN, 1.0), (1.0, f32::INFINITY)] {
            assert!(matches!(t.scale(sx, sy), Err(GridError::InvalidScale { .. })));
            assert_eq!(t, original);
        }

        // a legal multiplier that underflows the product is refused too
        let mut tiny = ViewTransform::from_scale_translation(1e-30, 1e-30, 0.0, 0.0).unwrap();
        assert!(tiny.scale(1e-30, 1e-30).is_err());
        assert_eq!(tiny.scale_factors(), (1e-30, 1e-30));
    }

    #[test]
    fn test_scale_about_anchor_is_invariant() {
        let mut t = ViewTransform::from_scale_translation(1.25, 1.25, 40.0, -15.0).unwrap();
        let anchor = GridPoint::new(123.0, 45.0);
        let before = t.apply(anchor);

        t.scale_about(2.0, 2.0, anchor).unwrap();

        assert_near(t.apply(anchor), before);
        assert_eq!(t.scale_factors(), (2.5, 2.5));
    }

    #[test]
    fn test_scale_about_focus_keeps_cursor_point() {
        let mut t = ViewTransform::from_scale_translation(0.8, 0.8, -60.0, 25.0).unwrap();
        let focus = ScreenPoint::new(400.0, 300.0);
        let under_cursor = t.invert().unwrap().apply(focus);

        t.scale_about_focus(1.1, 1.1, focus).unwrap();
        assert_near(t.apply(under_cursor), focus);

        t.scale_about_focus(0.5, 0.5, focus).unwrap();
        assert_near(t.apply(under_cursor), focus);
    }

    #[test]
    fn test_then() {
        let a = ViewTransform::from_scale_translation(2.0, 2.0, 1.0, 1.0).unwrap();
        let b = AffineTransform::<ScreenSpace, ScreenSpace>::from_scale_translation(1.0, 1.0, 10.0, 0.0).unwrap();
        let p = GridPoint::new(3.0, 4.0);

        assert_eq!(a.then(&b).apply(p), b.apply(a.apply(p)));
    }
}

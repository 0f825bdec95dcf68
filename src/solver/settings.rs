use crate::algebra::*;
use derive_builder::Builder;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// A field holds a value outside of its allowed range
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}

/// Settings for the polishing stage.
///
/// Use [`PolishSettingsBuilder`] to construct settings with
/// defaults for every unspecified field.  Values are checked
/// when the builder is built.
///
/// ```
/// use qp_polish::solver::PolishSettingsBuilder;
///
/// let settings = PolishSettingsBuilder::<f64>::default()
///     .rho(1e-2)
///     .polish_refine_iter(5)
///     .build()
///     .unwrap();
/// assert_eq!(settings.delta, 1e-6);
///
/// // rho must be strictly positive
/// assert!(PolishSettingsBuilder::<f64>::default().rho(0.).build().is_err());
/// ```
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PolishSettings<T: FloatT> {
    ///active set tolerance parameter.  A row is classified as active
    ///when its slack is within `rho * u[j]` of a bound
    #[builder(default = "(0.1).as_T()")]
    pub rho: T,

    ///regularization of the reduced KKT system
    #[builder(default = "(1e-6).as_T()")]
    pub delta: T,

    ///iterative refinement steps after the regularized solve
    #[builder(default = "3")]
    pub polish_refine_iter: u32,

    ///maximum run time of one polish attempt (seconds)
    #[builder(default = "f64::INFINITY")]
    pub time_limit: f64,

    ///print a summary after a successful attempt
    #[builder(default = "false")]
    pub verbose: bool,

    ///record the wall time of each attempt
    #[builder(default = "false")]
    pub profiling: bool,

    ///LDL dynamic regularization threshold
    #[builder(default = "(1e-13).as_T()")]
    pub dynamic_regularization_eps: T,

    ///LDL dynamic regularization shift
    #[builder(default = "(2e-7).as_T()")]
    pub dynamic_regularization_delta: T,

    ///scaling of the AMD dense row threshold
    #[builder(default = "1.5")]
    pub amd_dense_scale: f64,
}

impl<T> Default for PolishSettings<T>
where
    T: FloatT,
{
    fn default() -> PolishSettings<T> {
        PolishSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> PolishSettings<T>
where
    T: FloatT,
{
    /// Checks that every numerical field is within its allowed range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_positive(self.rho, "rho")?;
        validate_positive(self.delta, "delta")?;
        validate_time_limit(self.time_limit)?;
        validate_nonnegative(self.dynamic_regularization_eps, "dynamic_regularization_eps")?;
        validate_positive(self.dynamic_regularization_delta, "dynamic_regularization_delta")?;
        validate_positive(self.amd_dense_scale, "amd_dense_scale")?;
        Ok(())
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for PolishSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        PolishSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> PolishSettingsBuilder<T>
where
    T: FloatT,
{
    /// check that any values specified so far are valid
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(rho) = self.rho {
            validate_positive(rho, "rho")?;
        }
        if let Some(delta) = self.delta {
            validate_positive(delta, "delta")?;
        }
        if let Some(time_limit) = self.time_limit {
            validate_time_limit(time_limit)?;
        }
        if let Some(eps) = self.dynamic_regularization_eps {
            validate_nonnegative(eps, "dynamic_regularization_eps")?;
        }
        if let Some(delta) = self.dynamic_regularization_delta {
            validate_positive(delta, "dynamic_regularization_delta")?;
        }
        if let Some(scale) = self.amd_dense_scale {
            validate_positive(scale, "amd_dense_scale")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

// NaN fails both of these checks
fn validate_positive<T: FloatT>(v: T, field: &'static str) -> Result<(), SettingsError> {
    if v > T::zero() && v.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue(field))
    }
}

fn validate_nonnegative<T: FloatT>(v: T, field: &'static str) -> Result<(), SettingsError> {
    if v >= T::zero() && v.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue(field))
    }
}

// an infinite limit is allowed and means no limit
fn validate_time_limit(time_limit: f64) -> Result<(), SettingsError> {
    if time_limit > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("time_limit"))
    }
}

#[test]
fn test_settings_validate() {
    // all standard settings
    let settings = PolishSettingsBuilder::<f64>::default().build().unwrap();
    assert_eq!(settings, PolishSettings::default());
    assert_eq!(settings.rho, 0.1);
    assert_eq!(settings.polish_refine_iter, 3);
    assert!(settings.time_limit.is_infinite());

    // fail on bad values
    assert!(PolishSettingsBuilder::<f64>::default().rho(-1.).build().is_err());
    assert!(PolishSettingsBuilder::<f64>::default().delta(0.).build().is_err());
    assert!(PolishSettingsBuilder::<f64>::default()
        .time_limit(f64::NAN)
        .build()
        .is_err());
    assert!(PolishSettingsBuilder::<f64>::default()
        .amd_dense_scale(0.)
        .build()
        .is_err());

    // the error message names the field
    let err = PolishSettingsBuilder::<f64>::default()
        .rho(f64::NAN)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("rho"));

    // directly construct bad settings and manually check
    let settings = PolishSettings::<f64> {
        delta: -1.0,
        ..PolishSettings::default()
    };
    assert_eq!(
        settings.validate(),
        Err(SettingsError::BadFieldValue("delta"))
    );
}

use crate::extract::{
    FromParam, Multipart, ParamDescriptor, ParamKind, RequestSnapshot, ResolveRejection, Resolved,
    ResolverConfig,
};

/// Resolves declared parameters against a [`RequestSnapshot`].
///
/// ```
/// use reqparam::extract::{ParamDescriptor, RequestSnapshot, Resolver};
///
/// let snapshot = RequestSnapshot::new().param("name", "alice");
/// let name: String = Resolver::default()
///     .resolve(&snapshot, &ParamDescriptor::of::<String>("name").not_empty())
///     .unwrap();
///
/// assert_eq!(name, "alice");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    /// Create a resolver with the given configuration.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// The resolver configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Returns `true` if this resolver handles `param`.
    pub fn supports(&self, param: &ParamDescriptor) -> bool {
        if param.is_not_empty() {
            true
        } else if param.is_request_part() {
            false
        } else if param.kind().requires_multipart() {
            true
        } else {
            self.config.use_default_resolution
        }
    }

    /// Resolve `param` and convert it into `T`.
    pub fn resolve<T>(
        &self,
        snapshot: &RequestSnapshot,
        param: &ParamDescriptor,
    ) -> Result<T, ResolveRejection>
    where
        T: FromParam,
    {
        let value = self.resolve_value(snapshot, param)?;

        T::from_resolved(value).map_err(|source| ResolveRejection::Conversion {
            name: param.name().to_owned(),
            ty: param.type_name(),
            source,
        })
    }

    /// Resolve `param`, applying its default value and required-ness.
    ///
    /// A parameter that is neither present nor required resolves to
    /// [`Resolved::Absent`].
    pub fn resolve_value(
        &self,
        snapshot: &RequestSnapshot,
        param: &ParamDescriptor,
    ) -> Result<Resolved, ResolveRejection> {
        let name = param.name();

        if !self.supports(param) {
            return Err(ResolveRejection::Unsupported {
                name: name.to_owned(),
            });
        }

        let value = self.resolve_name(snapshot, param)?;

        match (value, param.default()) {
            (Resolved::Absent, Some(default)) => Ok(Resolved::Value(default.to_owned())),
            (Resolved::Absent, None) if param.is_required() => {
                Err(ResolveRejection::MissingValue {
                    name: name.to_owned(),
                    ty: param.type_name(),
                })
            }
            (Resolved::Value(value), Some(default)) if value.is_empty() => {
                Ok(Resolved::Value(default.to_owned()))
            }
            (value, _) => Ok(value),
        }
    }

    /// Read the raw value of `param` out of the snapshot and enforce the
    /// not-empty marker.
    pub fn resolve_name(
        &self,
        snapshot: &RequestSnapshot,
        param: &ParamDescriptor,
    ) -> Result<Resolved, ResolveRejection> {
        let name = param.name();

        let value = match param.kind() {
            ParamKind::File => {
                let multipart = self.multipart(snapshot, name)?;
                multipart
                    .get_file(name)
                    .cloned()
                    .map_or(Resolved::Absent, Resolved::File)
            }
            ParamKind::FileList => {
                let multipart = self.multipart(snapshot, name)?;
                let files = multipart.get_files(name);

                if files.is_empty() {
                    Resolved::Absent
                } else {
                    Resolved::Files(files.into_iter().cloned().collect())
                }
            }
            ParamKind::Part => {
                let multipart = self.multipart(snapshot, name)?;
                multipart
                    .get_part(name)
                    .cloned()
                    .map_or(Resolved::Absent, Resolved::Part)
            }
            ParamKind::PartList => {
                let multipart = self.multipart(snapshot, name)?;
                Resolved::Parts(multipart.parts().to_vec())
            }
            ParamKind::Scalar => scalar(snapshot, name),
        };

        tracing::debug!(param = name, kind = ?param.kind(), absent = value.is_absent(), "resolved parameter");

        if param.is_not_empty() && is_empty(&value) {
            return Err(ResolveRejection::Validation {
                name: name.to_owned(),
                message: format!("{}{}", name, self.tip(param)),
            });
        }

        Ok(value)
    }

    fn multipart<'s>(
        &self,
        snapshot: &'s RequestSnapshot,
        name: &str,
    ) -> Result<&'s Multipart, ResolveRejection> {
        if !snapshot.is_multipart() {
            return Err(ResolveRejection::InvalidRequest {
                name: name.to_owned(),
            });
        }

        snapshot
            .get_multipart()
            .ok_or_else(|| ResolveRejection::MultipartUnavailable {
                name: name.to_owned(),
            })
    }

    fn tip<'a>(&'a self, param: &'a ParamDescriptor) -> &'a str {
        param.configured_tip().unwrap_or(&self.config.default_tip)
    }
}

fn scalar(snapshot: &RequestSnapshot, name: &str) -> Resolved {
    if let Some(multipart) = snapshot.get_multipart() {
        let mut files = multipart.get_files(name);

        match files.len() {
            0 => {}
            1 => return Resolved::File(files.remove(0).clone()),
            _ => return Resolved::Files(files.into_iter().cloned().collect()),
        }
    }

    let mut values = snapshot.values(name);

    match values.len() {
        0 => Resolved::Absent,
        1 => Resolved::Value(values.remove(0).to_owned()),
        _ => Resolved::Values(values.into_iter().map(str::to_owned).collect()),
    }
}

fn is_empty(value: &Resolved) -> bool {
    match value {
        Resolved::Absent => true,
        Resolved::Value(value) => value.trim().is_empty(),
        _ => false,
    }
}

#![allow(non_snake_case)]

use super::*;
use crate::algebra::*;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

// Everything needed to replay a polish attempt: the problem as
// provided by the user, the outer iteration's hand-off and settings.

#[derive(Serialize, Deserialize)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
struct JsonWorkspaceData<T: FloatT> {
    pub P: CscMatrix<T>,
    pub q: Vec<T>,
    pub A: CscMatrix<T>,
    pub l: Vec<T>,
    pub u: Vec<T>,
    pub iterate: Iterate<T>,
    pub x: Vec<T>,
    pub lambda: Vec<T>,
    pub res_prim: T,
    pub res_dual: T,
    pub obj_val: Option<T>,
    pub settings: PolishSettings<T>,
}

impl<T> Workspace<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    /// Writes the problem data, iterate, best known point and settings
    /// to `file` in JSON format.
    pub fn save_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let mut json_data = JsonWorkspaceData {
            P: self.data.P.clone(),
            q: self.data.q.clone(),
            A: self.data.A.clone(),
            l: self.data.l.clone(),
            u: self.data.u.clone(),
            iterate: self.iterate.clone(),
            x: self.solution.x.clone(),
            lambda: self.solution.lambda.clone(),
            res_prim: self.info.res_prim,
            res_dual: self.info.res_dual,
            obj_val: Some(self.info.obj_val).filter(|v| !v.is_nan()),
            settings: self.settings.clone(),
        };

        // JSON has no representation for infinite values
        sanitize(&mut json_data);

        // write to file
        let json = serde_json::to_string(&json_data)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }

    /// Reads a workspace written by [`save_to_file`](Workspace::save_to_file).
    /// The stored settings are replaced by `settings` if provided.
    pub fn load_from_file(
        file: &mut File,
        settings: Option<PolishSettings<T>>,
    ) -> Result<Self, io::Error> {
        // read file
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let mut json_data: JsonWorkspaceData<T> = serde_json::from_str(&buffer)?;

        // restore sanitized infinities
        desanitize(&mut json_data);

        let d = json_data;
        let settings = settings.unwrap_or(d.settings);

        let mut ws = Self::new(&d.P, &d.q, &d.A, &d.l, &d.u, settings).map_err(invalid_data)?;
        ws.set_iterate(&d.iterate.z, &d.iterate.u)
            .map_err(invalid_data)?;
        ws.set_best(
            &d.x,
            &d.lambda,
            d.res_prim,
            d.res_dual,
            d.obj_val.unwrap_or_else(T::nan),
        )
        .map_err(invalid_data)?;

        Ok(ws)
    }
}

fn invalid_data(e: DataError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

fn sanitize<T: FloatT>(data: &mut JsonWorkspaceData<T>) {
    let clip = |v: &mut T| {
        if *v == T::infinity() {
            *v = T::max_value();
        } else if *v == T::neg_infinity() {
            *v = T::min_value();
        }
    };
    data.l.iter_mut().for_each(clip);
    data.u.iter_mut().for_each(clip);
    clip(&mut data.res_prim);
    clip(&mut data.res_dual);

    if data.settings.time_limit == f64::INFINITY {
        data.settings.time_limit = f64::MAX;
    }
}

fn desanitize<T: FloatT>(data: &mut JsonWorkspaceData<T>) {
    let unclip = |v: &mut T| {
        if *v == T::max_value() {
            *v = T::infinity();
        } else if *v == T::min_value() {
            *v = T::neg_infinity();
        }
    };
    data.l.iter_mut().for_each(unclip);
    data.u.iter_mut().for_each(unclip);
    unclip(&mut data.res_prim);
    unclip(&mut data.res_dual);

    if data.settings.time_limit == f64::MAX {
        data.settings.time_limit = f64::INFINITY;
    }
}

#[test]
fn test_json_io() {
    use std::io::{Seek, SeekFrom};

    let P = CscMatrix::from(&[[2.0]]);
    let A = CscMatrix::from(&[[-1.0], [1.0]]);
    let q = [1.0];
    let l = [f64::NEG_INFINITY, 0.5];
    let u = [2.0, f64::INFINITY];

    let settings = PolishSettingsBuilder::default().rho(0.2).build().unwrap();

    let mut ws = Workspace::<f64>::new(&P, &q, &A, &l, &u, settings).unwrap();
    ws.set_iterate(&[0.45, -0.45, 0.2], &[1.0, 1.0]).unwrap();

    // write the workspace to a file
    let mut file = tempfile::tempfile().unwrap();
    ws.save_to_file(&mut file).unwrap();

    // read the workspace from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let mut ws2 = Workspace::<f64>::load_from_file(&mut file, None).unwrap();

    assert_eq!(ws2.data.l, ws.data.l);
    assert_eq!(ws2.data.u, ws.data.u);
    assert_eq!(ws2.iterate, ws.iterate);
    assert_eq!(ws2.settings, ws.settings);
    assert!(ws2.info.res_prim.is_infinite());
    assert!(ws2.info.obj_val.is_nan());

    assert_eq!(ws.polish(), ws2.polish());
    assert_eq!(ws.solution, ws2.solution);
}

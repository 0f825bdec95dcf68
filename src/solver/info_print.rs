use super::*;
use crate::algebra::*;
use std::io::Write;

macro_rules! expformat {
    ($fmt:expr,$val:expr) => {
        if $val.is_finite() {
            _exp_str_reformat(format!($fmt, $val))
        } else {
            format!($fmt, $val)
        }
    };
}

impl<T> Workspace<T>
where
    T: FloatT,
{
    /// Writes a summary of the last polish attempt to the print target.
    pub fn print_polish_summary(&mut self) -> std::io::Result<()> {
        let out = &mut self.stream;
        let info = &self.info;
        let active = &self.work.active;

        writeln!(out, "\npolish: {}", info.polish_status)?;
        writeln!(
            out,
            "  active rows   = {} (lower {}, upper {}, free {})",
            active.mred(),
            active.ind_lower.len(),
            active.ind_upper.len(),
            active.ind_free.len()
        )?;
        writeln!(out, "  refine iter   = {}", info.refine_iterations)?;
        writeln!(out, "  objective     = {}", expformat!("{:+8.4e}", info.obj_val))?;
        writeln!(out, "  primal res    = {}", expformat!("{:8.2e}", info.res_prim))?;
        writeln!(out, "  dual res      = {}", expformat!("{:8.2e}", info.res_dual))?;

        if self.settings.profiling {
            writeln!(
                out,
                "  polish time   = {}s",
                expformat!("{:8.2e}", info.polish_time)
            )?;
            if let Some(timers) = &self.timers {
                timers.print(out)?;
            }
        }
        out.flush()
    }
}

// Rust prints exponents as "1.0e-5" rather than the "1.0e-05"
// used everywhere else.  Pad short exponents and add a '+' sign.
fn _exp_str_reformat(mut thestr: String) -> String {
    let Some(eidx) = thestr.find('e') else {
        return thestr;
    };
    let has_sign = thestr[eidx + 1..].starts_with('-');
    let digits = thestr.len() - eidx - 1 - usize::from(has_sign);

    let chars = match (has_sign, digits == 1) {
        (false, true) => "+0",
        (false, false) => "+",
        (true, true) => "-0",
        (true, false) => "-",
    };

    let shift = if has_sign { 2 } else { 1 };
    thestr.replace_range(eidx + 1..eidx + shift, chars);
    thestr
}

#[test]
fn test_exp_str_reformat() {
    assert_eq!(_exp_str_reformat(format!("{:8.2e}", 1.5e-5)), " 1.50e-05");
    assert_eq!(_exp_str_reformat(format!("{:+8.4e}", 2.0)), "+2.0000e+00");
    assert_eq!(_exp_str_reformat(format!("{:e}", 1.0e100)), "1e+100");
    assert_eq!(_exp_str_reformat("nan".to_string()), "nan");
}

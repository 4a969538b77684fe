use std::f64::consts::PI;

pub(crate) type MathFn = fn(f64) -> f64;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Builtin {
    pub name: &'static str,
    pub func: MathFn,
    /// Forward trig functions read their argument in degrees when asked to.
    pub takes_angle: bool,
}

impl Builtin {
    pub fn apply(&self, arg: f64, use_degrees: bool) -> f64 {
        let arg = if use_degrees && self.takes_angle {
            arg * PI / 180.0
        } else {
            arg
        };
        (self.func)(arg)
    }
}

const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "sin",
        func: f64::sin,
        takes_angle: true,
    },
    Builtin {
        name: "asin",
        func: f64::asin,
        takes_angle: false,
    },
    Builtin {
        name: "tan",
        func: f64::tan,
        takes_angle: true,
    },
    Builtin {
        name: "atan",
        func: f64::atan,
        takes_angle: false,
    },
    Builtin {
        name: "cos",
        func: f64::cos,
        takes_angle: true,
    },
    Builtin {
        name: "acos",
        func: f64::acos,
        takes_angle: false,
    },
    Builtin {
        name: "sqrt",
        func: f64::sqrt,
        takes_angle: false,
    },
];

pub const SUPPORTED_FUNCTIONS: [&str; 7] = ["sin", "asin", "tan", "atan", "cos", "acos", "sqrt"];

pub(crate) fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

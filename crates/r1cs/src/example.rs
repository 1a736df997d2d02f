//! Random satisfiable constraint systems for tests and benchmarks

use crate::{LinearCombination, R1CSError, Variable, R1CS};
use ark_ff::Field;
use ark_std::{rand::Rng, vec::Vec};

/// A constraint system together with a satisfying assignment
#[derive(Debug, Clone)]
pub struct R1CSExample<F: Field> {
    pub constraint_system: R1CS<F>,
    pub primary_input: Vec<F>,
    pub auxiliary_input: Vec<F>,
}

impl<F: Field> R1CSExample<F> {
    pub fn is_satisfied(&self) -> Result<bool, R1CSError> {
        self.constraint_system
            .is_satisfied(&self.primary_input, &self.auxiliary_input)
    }
}

/// Generate a random satisfiable R1CS with `num_constraints` constraints and
/// `num_inputs` primary inputs.
///
/// The system has `num_constraints + 2` variables. The first two are random,
/// each of the next `num_constraints - 1` is derived from its two predecessors
/// (alternating `a + b` and `a * b`), and the last is the square of the sum of
/// all the others. The first `num_inputs` variables become primary inputs.
pub fn generate_r1cs_example_with_field_input<F, R>(
    num_constraints: usize,
    num_inputs: usize,
    rng: &mut R,
) -> Result<R1CSExample<F>, R1CSError>
where
    F: Field,
    R: Rng + ?Sized,
{
    if num_constraints == 0 {
        return Err(R1CSError::InvalidExample(
            "at least one constraint is required".to_string(),
        ));
    }
    let num_vars = num_constraints + 2;
    if num_inputs > num_vars {
        return Err(R1CSError::InvalidExample(format!(
            "{} primary inputs requested but only {} variables available",
            num_inputs, num_vars
        )));
    }

    let mut cs = R1CS::<F>::new();
    let vars = (0..num_vars)
        .map(|i| {
            if i < num_inputs {
                cs.alloc_public_input()
            } else {
                Ok(cs.alloc_variable())
            }
        })
        .collect::<Result<Vec<Variable>, _>>()?;

    let mut values = Vec::with_capacity(num_vars);
    let mut a = F::rand(rng);
    let mut b = F::rand(rng);
    values.push(a);
    values.push(b);

    for i in 0..num_constraints - 1 {
        let (lhs, rhs, out) = (vars[i], vars[i + 1], vars[i + 2]);
        let next = if i % 2 == 1 {
            cs.add_constraint(
                LinearCombination::from_variable(lhs),
                LinearCombination::from_variable(rhs),
                LinearCombination::from_variable(out),
            )?;
            a * b
        } else {
            cs.add_constraint(
                LinearCombination::from_variable(lhs).with_term(F::one(), rhs),
                R1CS::one(),
                LinearCombination::from_variable(out),
            )?;
            a + b
        };
        values.push(next);
        a = b;
        b = next;
    }

    let last = vars[num_vars - 1];
    let sum_lc = vars[..num_vars - 1]
        .iter()
        .fold(LinearCombination::new(), |lc, var| lc.with_term(F::one(), *var));
    let sum = values.iter().fold(F::zero(), |acc, value| acc + value);
    cs.add_constraint(sum_lc.clone(), sum_lc, LinearCombination::from_variable(last))?;
    values.push(sum.square());

    let auxiliary_input = values.split_off(num_inputs);
    Ok(R1CSExample {
        constraint_system: cs,
        primary_input: values,
        auxiliary_input,
    })
}

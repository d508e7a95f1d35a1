//! Variable naming for network-shaped expressions and the squared error
//! built from them.

use sym_ast::Expression;

use crate::error::EngineError;

/// Canonical names for per-sample variables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymbolGenerator;

impl SymbolGenerator {
    pub fn input(&self, i: usize) -> String {
        format!("I[{}]", i)
    }

    pub fn output(&self, i: usize) -> String {
        format!("O[{}]", i)
    }

    /// Residual gradient flowing back into output `i`.
    pub fn gradient(&self, i: usize) -> String {
        format!("GRADIENT[{}]", i)
    }

    pub fn input_var(&self, i: usize) -> Expression {
        Expression::var(self.input(i))
    }

    pub fn output_var(&self, i: usize) -> Expression {
        Expression::var(self.output(i))
    }
}

/// Location of one weight inside a fully connected layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeightAddress {
    Edge { node: usize, edge: usize },
    Bias { node: usize },
}

/// Dense indexing of the weights of a fully connected layer.
///
/// Node `n` owns indices `n * (inputs + 1) .. (n + 1) * (inputs + 1)`: one per
/// incoming edge, then its bias. Every weight is named `W[k]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DenseWeights {
    num_inputs: usize,
    num_outputs: usize,
}

impl DenseWeights {
    pub fn new(num_inputs: usize, num_outputs: usize) -> Self {
        Self {
            num_inputs,
            num_outputs,
        }
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    fn stride(&self) -> usize {
        self.num_inputs + 1
    }

    /// Total weight count, biases included.
    pub fn len(&self) -> usize {
        self.num_outputs * self.stride()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn index(&self, address: WeightAddress) -> Option<usize> {
        match address {
            WeightAddress::Edge { node, edge } if node < self.num_outputs && edge < self.num_inputs => {
                Some(node * self.stride() + edge)
            }
            WeightAddress::Bias { node } if node < self.num_outputs => {
                Some(node * self.stride() + self.num_inputs)
            }
            _ => None,
        }
    }

    /// Inverse of [`DenseWeights::index`].
    pub fn address(&self, index: usize) -> Option<WeightAddress> {
        if index >= self.len() {
            return None;
        }
        let node = index / self.stride();
        let edge = index % self.stride();
        Some(if edge == self.num_inputs {
            WeightAddress::Bias { node }
        } else {
            WeightAddress::Edge { node, edge }
        })
    }

    pub fn weight(&self, node: usize, edge: usize) -> Option<String> {
        self.index(WeightAddress::Edge { node, edge }).map(weight_name)
    }

    pub fn bias(&self, node: usize) -> Option<String> {
        self.index(WeightAddress::Bias { node }).map(weight_name)
    }

    /// All weight names in index order.
    pub fn names(&self) -> Vec<String> {
        (0..self.len()).map(weight_name).collect()
    }

    /// `bias(node) + Σ weight(node, e) * inputs[e]`.
    ///
    /// Extra inputs past `num_inputs` are ignored; `None` if `node` is out of
    /// range.
    pub fn weighted_sum(&self, node: usize, inputs: &[Expression]) -> Option<Expression> {
        let bias = Expression::var(self.bias(node)?);
        let terms = inputs
            .iter()
            .take(self.num_inputs)
            .enumerate()
            .map(|(edge, input)| {
                self.weight(node, edge)
                    .map(|w| Expression::var(w) * input)
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Expression::sum(bias, terms))
    }
}

fn weight_name(index: usize) -> String {
    format!("W[{}]", index)
}

/// `Σ (outputs[i] - targets[i]) * (outputs[i] - targets[i])`.
pub fn squared_error(
    outputs: &[Expression],
    targets: &[Expression],
) -> Result<Expression, EngineError> {
    if outputs.len() != targets.len() {
        return Err(EngineError::LengthMismatch {
            outputs: outputs.len(),
            targets: targets.len(),
        });
    }

    let mut terms = outputs.iter().zip(targets).map(|(o, t)| {
        let diff = o - t;
        &diff * &diff
    });
    let head = terms.next().ok_or(EngineError::Empty)?;
    Ok(Expression::sum(head, terms))
}

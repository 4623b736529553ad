use ldquery_grammar::{var, Expression, Function, OrderCondition};
use ldquery_model::{NamedNode, QueryBuildError, Variable};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The query string parameters of a listing request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingParams {
    /// The page to return, starting at one. Ignored if `startindex` is set.
    pub page: u64,
    pub limit: Option<u64>,
    /// The offset of the first result.
    pub startindex: Option<u64>,
    /// The predicate whose value orders the results.
    pub order_by: Option<String>,
    pub order_by_direction: Option<SortDirection>,
    /// The value that orders the results. Defaults to `order_by_val` if an order predicate is
    /// known.
    pub order_by_value: Option<OrderValue>,
    /// `[min_x, min_y, max_x, max_y]`
    pub bbox: Vec<f64>,
    pub filter_crs: Option<String>,
    /// An instant or an interval, e.g., `2018-02-12T00:00:00Z/..`.
    pub datetime: Option<String>,
}

impl Default for ListingParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
            startindex: None,
            order_by: None,
            order_by_direction: None,
            order_by_value: None,
            bbox: Vec::new(),
            filter_crs: None,
            datetime: None,
        }
    }
}

impl ListingParams {
    /// Computes the LIMIT and OFFSET of the request.
    ///
    /// The limit defaults to `default_limit` and is clamped to `max_limit`. The offset is
    /// `startindex` if given and `limit * (page - 1)` otherwise.
    pub fn pagination(
        &self,
        default_limit: u64,
        max_limit: u64,
    ) -> Result<Pagination, QueryBuildError> {
        let limit = self.limit.unwrap_or(default_limit).min(max_limit);
        if limit == 0 {
            return Err(invalid("limit", "must be greater than zero"));
        }
        let offset = match self.startindex {
            Some(startindex) => startindex,
            None => {
                if self.page == 0 {
                    return Err(invalid("page", "pages start at 1"));
                }
                limit
                    .checked_mul(self.page - 1)
                    .ok_or_else(|| invalid("page", "is too large"))?
            }
        };
        Ok(Pagination { limit, offset })
    }

    /// Parses the `order_by` predicate.
    pub fn order_by_predicate(&self) -> Result<Option<NamedNode>, QueryBuildError> {
        self.order_by
            .as_deref()
            .map(|iri| {
                NamedNode::new(iri)
                    .map_err(|error| invalid("order_by", &format!("'{iri}' is not an IRI: {error}")))
            })
            .transpose()
    }

    /// Resolves the ordering of the request.
    ///
    /// Without `order_by_value`, a search is ordered by weight and other listings by the value of
    /// the order predicate. `default_predicate` is used for `order_by_val` if `order_by` is not
    /// set. A label ordering only uses an explicit `order_by`. Weights are ordered descending
    /// unless a direction is given. Returns [None] if nothing orders the results.
    pub fn ordering(
        &self,
        default_predicate: Option<NamedNode>,
        search: bool,
    ) -> Result<Option<Ordering>, QueryBuildError> {
        let explicit = self.order_by_predicate()?;
        let (value, predicate) = match self.order_by_value {
            Some(OrderValue::Label) => (OrderValue::Label, explicit),
            Some(OrderValue::Weight) => (OrderValue::Weight, None),
            Some(OrderValue::OrderByVal) => {
                (OrderValue::OrderByVal, explicit.or(default_predicate))
            }
            None if search => (OrderValue::Weight, None),
            None => match explicit.or(default_predicate) {
                Some(predicate) => (OrderValue::OrderByVal, Some(predicate)),
                None => return Ok(None),
            },
        };
        let direction = match (self.order_by_direction, value) {
            (Some(direction), _) => direction,
            (None, OrderValue::Weight) => SortDirection::Desc,
            (None, _) => SortDirection::Asc,
        };
        Ok(Some(Ordering {
            predicate,
            value,
            direction,
        }))
    }
}

/// The LIMIT and OFFSET of a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// The variable that orders the results of a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderValue {
    /// The label of the focus node.
    Label,
    /// The value of the `order_by` predicate.
    OrderByVal,
    /// The weight of a search result.
    Weight,
}

impl FromStr for OrderValue {
    type Err = QueryBuildError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "label" => Ok(OrderValue::Label),
            "order_by_val" => Ok(OrderValue::OrderByVal),
            "weight" => Ok(OrderValue::Weight),
            _ => Err(invalid(
                "order_by_value",
                "must be \"label\", \"order_by_val\", or \"weight\"",
            )),
        }
    }
}

impl OrderValue {
    pub fn variable(self) -> Variable {
        var(match self {
            OrderValue::Label => "label",
            OrderValue::OrderByVal => "order_by_val",
            OrderValue::Weight => "weight",
        })
    }

    /// Weights are ordered numerically. Everything else is ordered by its string value, which
    /// ignores language tags.
    fn expression(self) -> Expression {
        match self {
            OrderValue::Weight => self.variable().into(),
            OrderValue::Label | OrderValue::OrderByVal => {
                Expression::call(Function::Str, [self.variable().into()])
            }
        }
    }
}

/// The ORDER BY of a listing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ordering {
    /// Binds `?order_by_val` in the inner select if set.
    pub predicate: Option<NamedNode>,
    pub value: OrderValue,
    pub direction: SortDirection,
}

impl Ordering {
    /// Orders by the value of `predicate`.
    pub fn by_predicate(predicate: NamedNode, direction: SortDirection) -> Self {
        Self {
            predicate: Some(predicate),
            value: OrderValue::OrderByVal,
            direction,
        }
    }

    pub fn condition(&self) -> OrderCondition {
        let expression = self.value.expression();
        match self.direction {
            SortDirection::Asc => OrderCondition::Asc(expression),
            SortDirection::Desc => OrderCondition::Desc(expression),
        }
    }
}

pub(crate) fn invalid(name: &'static str, message: &str) -> QueryBuildError {
    QueryBuildError::InvalidParameter {
        name,
        message: message.to_owned(),
    }
}

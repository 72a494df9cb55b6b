/*!

This is the long-form manual for `hotspot_survey` and `hotspot`.

## Input files

Two spreadsheet exports are needed, one for the staff survey and one for the
learner survey. Only the first worksheet is read, unless a worksheet name is
provided. The first row is the header and is not read.

The columns are selected by their letters, as in Excel:

| survey  | columns   | fields |
|---------|-----------|--------|
| staff   | `A:B,H:P` | 10     |
| learner | `A:B,H:S` | 13     |

Column `A` is the respondent id. The other selected columns become, in order:

* staff: `date`, `loc_5west_yn`, `loc_8west_yn`, `loc_8south_yn`,
  `loc_other_text`, `healthcare_discrim`, `healthcare_harass`,
  `healthcare_bully`, `inclusive`, `comments_text`
* learner: `date`, `loc_5west_yn`, `loc_8west_yn`, `loc_8south_yn`,
  `loc_other_text`, `clinical_supported`, `clinical_workload`,
  `clinical_comments_text`, `healthcare_discrim`, `healthcare_harass`,
  `healthcare_bully`, `inclusive`, `comments_text`

Rows with an empty `date` are surveys that were never submitted. They are
dropped.

## Answers

| fields                                                      | answers                           |
|-------------------------------------------------------------|-----------------------------------|
| `healthcare_discrim`, `healthcare_harass`, `healthcare_bully` | Never, Sometimes, Often           |
| `inclusive`, `clinical_supported`, `clinical_workload`      | Always, Often, Sometimes, Never   |

Any other non-empty answer is reported as unrecognized and left out of the
percentages. With `--strict`, it stops the program instead.

## Tabs

| tab      | rows kept                  |
|----------|----------------------------|
| All CTUs | all                        |
| 8 South  | `loc_8south_yn` is `Yes`   |
| 8 West   | `loc_8west_yn` is `Yes`    |
| 5 West   | `loc_5west_yn` is `Yes`    |

Each tab shows, when the corresponding rows exist:
* for the staff: the experiences of bullying, discrimination and harassment,
  and the inclusiveness of the work environment,
* for the learners: the experiences of bullying, discrimination and harassment,
  and the experience of clinical work (support, workload, inclusiveness).

## Configuration

Instead of passing the files on the command line, a configuration file in the
JSON format can be provided with `--config`:

```json
{
  "outputSettings": {
    "title": "CTU hotspot survey, June",
    "outputDirectory": "output",
    "generateHtml": true
  },
  "surveyFileSources": [
    { "role": "staff", "filePath": "staff.xlsx" },
    { "role": "learner", "filePath": "learners.xlsx", "columns": "A:B,H:S" }
  ],
  "rules": { "unrecognizedResponses": "exclude" }
}
```

The file paths are relative to the configuration file. The options passed on the
command line take precedence.

*/
